// src/noyau/lexeur.rs
//
// Lexeur paresseux : un jeton à la fois, tiré d’un flux d’octets.
// - un seul octet de recul (putback) côté flux
// - un seul jeton d’avance (pending) côté jetons
//
// Règles du tampon `pending` :
// - peek_* le remplit s’il est vide (et ne consomme rien)
// - next_* le vide d’abord avant de lire le flux
// - les variantes *_significant jettent les Newline rencontrés
//
// Le lexeur ne lit jamais au-delà de ce qu’il faut pour former le jeton suivant :
// après une évaluation, le flux reste positionné juste derrière ce qui a été consommé.

use std::io::{ErrorKind, Read};

use tracing::trace;

use super::erreur::{Error, Result};
use super::jetons::{Tok, TokKind};
use super::rationnel::Litteral;

pub struct Lexer<R> {
    flux: R,
    recul: Option<u8>,
    // jeton d’avance + position dans l’historique où il commence
    pending: Option<(Tok, usize)>,
    historique: Vec<u8>,
}

impl<R: Read> Lexer<R> {
    pub fn new(flux: R) -> Self {
        Self {
            flux,
            recul: None,
            pending: None,
            historique: Vec::new(),
        }
    }

    /* ------------------------ Octets ------------------------ */

    fn getch(&mut self) -> Result<Option<u8>> {
        if let Some(c) = self.recul.take() {
            self.historique.push(c);
            return Ok(Some(c));
        }

        let mut buf = [0u8; 1];
        loop {
            match self.flux.read(&mut buf) {
                Ok(0) => return Ok(None),
                Ok(_) => {
                    self.historique.push(buf[0]);
                    return Ok(Some(buf[0]));
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(Error::InputStream(e)),
            }
        }
    }

    fn putback(&mut self, c: u8) {
        self.historique.pop();
        self.recul = Some(c);
    }

    /* ------------------------ Balayage ------------------------ */

    fn scan(&mut self) -> Result<Tok> {
        // blancs ignorés, sauf \r et \n qui sont des jetons
        let c = loop {
            match self.getch()? {
                None => return Ok(Tok::Eof),
                Some(b' ' | b'\t' | 0x0b | 0x0c) => continue,
                Some(c) => break c,
            }
        };

        if c.is_ascii_digit() {
            return self.scan_number(c);
        }
        if c.is_ascii_alphabetic() {
            return self.scan_ident(c);
        }

        let tok = match c {
            b'+' => Tok::Plus,
            b'-' => Tok::Minus,
            b'*' => Tok::Star,
            b'/' => Tok::Slash,
            b'(' => Tok::LPar,
            b')' => Tok::RPar,
            b',' => Tok::Comma,
            b'\n' => Tok::Newline,
            b'\r' => {
                // CRLF = un seul Newline
                if let Some(n) = self.getch()? {
                    if n != b'\n' {
                        self.putback(n);
                    }
                }
                Tok::Newline
            }
            _ => {
                self.putback(c);
                return Err(Error::Lex { octet: c });
            }
        };
        Ok(tok)
    }

    fn scan_number(&mut self, premier: u8) -> Result<Tok> {
        let mut lit = Litteral::new();
        lit.chiffre_entier(premier - b'0');

        let mut fraction = false;
        while let Some(c) = self.getch()? {
            match c {
                b'0'..=b'9' if fraction => lit.chiffre_fraction(c - b'0'),
                b'0'..=b'9' => lit.chiffre_entier(c - b'0'),
                b'.' if !fraction => {
                    lit.virgule();
                    fraction = true;
                }
                _ => {
                    self.putback(c);
                    break;
                }
            }
        }

        Ok(Tok::Num(lit.valeur()))
    }

    fn scan_ident(&mut self, premier: u8) -> Result<Tok> {
        let mut nom = String::new();
        nom.push(char::from(premier));

        while let Some(c) = self.getch()? {
            if c.is_ascii_alphanumeric() {
                nom.push(char::from(c));
            } else {
                self.putback(c);
                break;
            }
        }

        Ok(Tok::Ident(nom))
    }

    /* ------------------------ Jetons bruts ------------------------ */

    /// Jeton suivant, Newline compris.
    pub fn next_token(&mut self) -> Result<Tok> {
        if let Some((tok, _)) = self.pending.take() {
            return Ok(tok);
        }
        let tok = self.scan()?;
        trace!(jeton = %tok, "jeton");
        Ok(tok)
    }

    /// Jeton suivant sans le consommer, Newline compris.
    pub fn peek_token(&mut self) -> Result<&Tok> {
        let (tok, _) = match self.pending.take() {
            Some(p) => self.pending.insert(p),
            None => {
                let debut = self.historique.len();
                let tok = self.scan()?;
                trace!(jeton = %tok, "jeton (avance)");
                self.pending.insert((tok, debut))
            }
        };
        Ok(&*tok)
    }

    /* ------------------------ Jetons significatifs ------------------------ */

    /// Jeton suivant en sautant les Newline.
    pub fn next_significant(&mut self) -> Result<Tok> {
        loop {
            let tok = self.next_token()?;
            if !tok.is(TokKind::Newline) {
                return Ok(tok);
            }
        }
    }

    /// Prochain jeton significatif, sans le consommer (les Newline avant lui sont consommés).
    pub fn peek_significant(&mut self) -> Result<&Tok> {
        while self.peek_token()?.is(TokKind::Newline) {
            self.pending = None;
        }
        self.peek_token()
    }

    /// Le prochain jeton significatif est-il de nature `kind` ?
    pub fn is(&mut self, kind: TokKind) -> Result<bool> {
        Ok(self.peek_significant()?.is(kind))
    }

    /* ------------------------ Historique ------------------------ */

    /// Texte source consommé depuis le dernier appel (blancs de bord retirés).
    /// Le texte d’un jeton lu d’avance reste pour l’unité suivante.
    pub fn take_history(&mut self) -> String {
        let coupe = match &mut self.pending {
            Some((_, debut)) => {
                let d = *debut;
                *debut = 0;
                d
            }
            None => self.historique.len(),
        };
        let reste = self.historique.split_off(coupe);
        let texte = std::mem::replace(&mut self.historique, reste);
        String::from_utf8_lossy(&texte).trim().to_string()
    }
}
