// src/noyau/erreur.rs
//
// Taxonomie des échecs du noyau.
// Aucune reprise : la première erreur interrompt l’évaluation en cours
// et remonte telle quelle à l’appelant (pas de valeur par défaut).

use thiserror::Error;

use super::jetons::TokKind;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Flux d’entrée inutilisable (fatal).
    #[error("flux d’entrée invalide: {0}")]
    InputStream(#[from] std::io::Error),

    /// Caractère non reconnu par le lexeur.
    #[error("caractère inattendu: {}", decrire_octet(.octet))]
    Lex { octet: u8 },

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("division par zéro")]
    DivisionByZero,

    #[error("{nom}: {attendu} argument(s) attendu(s), {obtenu} reçu(s)")]
    Arity {
        nom: String,
        attendu: usize,
        obtenu: usize,
    },

    #[error("fonction inconnue: {0}")]
    UnknownFunction(String),

    /// Argument hors du domaine d’une fonction intégrée (ex: sqrt(-1)).
    #[error("{nom}: {raison}")]
    Domain { nom: String, raison: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("jeton attendu: {attendu}, obtenu: {obtenu}")]
    ExpectedToken { attendu: TokKind, obtenu: TokKind },

    #[error("expression primaire attendue, obtenu: {0}")]
    ExpectedPrimary(TokKind),

    #[error("imbrication trop profonde (max {limite})")]
    TooDeeplyNested { limite: usize },

    #[error("expression trop longue: arbre de hauteur > {limite}")]
    TreeTooDeep { limite: usize },
}

/// Le caractère n’est montré que pour un octet ASCII (un octet UTF-8 isolé n’en est pas un).
fn decrire_octet(octet: &u8) -> String {
    if octet.is_ascii() {
        format!("{:?} (octet 0x{octet:02x})", char::from(*octet))
    } else {
        format!("octet 0x{octet:02x}")
    }
}

impl Error {
    pub(crate) fn domaine(nom: &str, raison: impl Into<String>) -> Self {
        Error::Domain {
            nom: nom.to_string(),
            raison: raison.into(),
        }
    }

    pub(crate) fn arite(nom: &str, attendu: usize, obtenu: usize) -> Self {
        Error::Arity {
            nom: nom.to_string(),
            attendu,
            obtenu,
        }
    }
}
