use serde::{Deserialize, Serialize};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Canonical document kinds recognized by the compliance engine.
///
/// `Otro` is the fallback bucket: normalization is total and never fails, so
/// free-text labels that match nothing still classify.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    CertificadoSeguridad,
    CertificadoCurso,
    LicenciaConducir,
    CarnetIdentidad,
    CertificadoMedico,
    CertificadoLaboral,
    Otro,
}

impl DocumentKind {
    pub const fn label(self) -> &'static str {
        match self {
            DocumentKind::CertificadoSeguridad => "certificado_seguridad",
            DocumentKind::CertificadoCurso => "certificado_curso",
            DocumentKind::LicenciaConducir => "licencia_conducir",
            DocumentKind::CarnetIdentidad => "carnet_identidad",
            DocumentKind::CertificadoMedico => "certificado_medico",
            DocumentKind::CertificadoLaboral => "certificado_laboral",
            DocumentKind::Otro => "otro",
        }
    }
}

/// Connective tokens dropped before dictionary lookup.
const STOP_WORDS: &[&str] = &["de", "del", "la", "el", "los", "las", "y", "para", "por"];

/// Label dictionary, exact match first and then first-substring-wins.
///
/// Declaration order is the tiebreak for ambiguous substrings, so multiword
/// keys sit above the single tokens they contain.
const KIND_TABLE: &[(&str, DocumentKind)] = &[
    ("certificado seguridad", DocumentKind::CertificadoSeguridad),
    ("induccion seguridad", DocumentKind::CertificadoSeguridad),
    ("epp", DocumentKind::CertificadoSeguridad),
    ("certificado curso", DocumentKind::CertificadoCurso),
    ("diploma", DocumentKind::CertificadoCurso),
    ("curso", DocumentKind::CertificadoCurso),
    ("licencia conducir", DocumentKind::LicenciaConducir),
    ("licencia", DocumentKind::LicenciaConducir),
    ("cedula identidad", DocumentKind::CarnetIdentidad),
    ("carnet identidad", DocumentKind::CarnetIdentidad),
    ("cedula", DocumentKind::CarnetIdentidad),
    ("carnet", DocumentKind::CarnetIdentidad),
    ("dni", DocumentKind::CarnetIdentidad),
    ("certificado medico", DocumentKind::CertificadoMedico),
    ("examen medico", DocumentKind::CertificadoMedico),
    ("certificado laboral", DocumentKind::CertificadoLaboral),
    ("contrato trabajo", DocumentKind::CertificadoLaboral),
    ("contrato", DocumentKind::CertificadoLaboral),
];

/// Canonicalize a free-text document-type label into a [`DocumentKind`].
pub fn normalize(raw: &str) -> DocumentKind {
    let key = normalized_key(raw);
    if key.is_empty() {
        return DocumentKind::Otro;
    }

    for (entry, kind) in KIND_TABLE {
        if *entry == key {
            return *kind;
        }
    }

    for (entry, kind) in KIND_TABLE {
        if key.contains(entry) {
            return *kind;
        }
    }

    DocumentKind::Otro
}

/// Lowercased, accent-stripped, stop-word-free token string used as the
/// dictionary key.
pub(crate) fn normalized_key(raw: &str) -> String {
    let lowered = raw.to_lowercase();
    let stripped: String = lowered.nfd().filter(|c| !is_combining_mark(*c)).collect();

    let mut spaced = String::with_capacity(stripped.len());
    for c in stripped.chars() {
        if c.is_alphanumeric() {
            spaced.push(c);
        } else {
            spaced.push(' ');
        }
    }

    spaced
        .split_whitespace()
        .filter(|token| !STOP_WORDS.contains(token))
        .collect::<Vec<_>>()
        .join(" ")
}
