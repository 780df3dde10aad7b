// src/noyau/jetons.rs

use std::fmt;

use num_rational::BigRational;
use num_traits::One;

/// Jeton produit par le lexeur.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Tok {
    Num(BigRational),
    Ident(String),

    Plus,
    Minus,
    Star,
    Slash,

    LPar,
    RPar,
    Comma,

    Newline,
    Eof,
}

/// Nature d’un jeton, sans sa charge (pour les tests et les messages d’erreur).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokKind {
    Num,
    Ident,
    Plus,
    Minus,
    Star,
    Slash,
    LPar,
    RPar,
    Comma,
    Newline,
    Eof,
}

impl Tok {
    pub fn kind(&self) -> TokKind {
        match self {
            Tok::Num(_) => TokKind::Num,
            Tok::Ident(_) => TokKind::Ident,
            Tok::Plus => TokKind::Plus,
            Tok::Minus => TokKind::Minus,
            Tok::Star => TokKind::Star,
            Tok::Slash => TokKind::Slash,
            Tok::LPar => TokKind::LPar,
            Tok::RPar => TokKind::RPar,
            Tok::Comma => TokKind::Comma,
            Tok::Newline => TokKind::Newline,
            Tok::Eof => TokKind::Eof,
        }
    }

    pub fn is(&self, kind: TokKind) -> bool {
        self.kind() == kind
    }
}

impl fmt::Display for TokKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TokKind::Num => "nombre",
            TokKind::Ident => "identifiant",
            TokKind::Plus => "'+'",
            TokKind::Minus => "'-'",
            TokKind::Star => "'*'",
            TokKind::Slash => "'/'",
            TokKind::LPar => "'('",
            TokKind::RPar => "')'",
            TokKind::Comma => "','",
            TokKind::Newline => "fin de ligne",
            TokKind::Eof => "fin d’entrée",
        };
        f.write_str(s)
    }
}

impl fmt::Display for Tok {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tok::Num(r) => {
                if r.denom().is_one() {
                    write!(f, "{}", r.numer())
                } else {
                    write!(f, "{}/{}", r.numer(), r.denom())
                }
            }
            Tok::Ident(name) => f.write_str(name),
            Tok::Plus => f.write_str("+"),
            Tok::Minus => f.write_str("-"),
            Tok::Star => f.write_str("*"),
            Tok::Slash => f.write_str("/"),
            Tok::LPar => f.write_str("("),
            Tok::RPar => f.write_str(")"),
            Tok::Comma => f.write_str(","),
            Tok::Newline => f.write_str("\\n"),
            Tok::Eof => f.write_str("<eof>"),
        }
    }
}
