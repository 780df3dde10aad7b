//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - on accepte certaines erreurs attendues (division par zéro, sqrt négatif)
//! - invariants clés :
//!   * même entrée => même résultat
//!   * l’arbre réécrit en texte se réévalue à la même valeur
//!   * un résultat entier s’affiche sans point décimal, un non-entier avec

use std::time::{Duration, Instant};

use num_rational::BigRational;
use num_traits::One;

use super::erreur::Error;
use super::eval::Evaluator;
use super::fonctions::fonctions_standard;
use super::format::format_rational;
use super::lexeur::Lexer;
use super::parseur::Parser;
use super::{eval_expression, Result};

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
    fn coin(&mut self) -> bool {
        (self.next_u32() & 1) == 1
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Helpers fuzz ------------------------ */

fn is_erreur_attendue(e: &Error) -> bool {
    // Liste blanche : erreurs *normales* pour des expressions tirées au hasard.
    matches!(e, Error::DivisionByZero | Error::Domain { .. })
}

fn check_invariant_format(v: &BigRational) {
    let txt = format_rational(v);
    if v.denom().is_one() {
        assert!(!txt.contains('.'), "entier affiché avec un point: {txt}");
    } else {
        assert!(txt.contains('.'), "non-entier sans point: {txt}");
    }
}

/// Relit l’expression, réécrit l’arbre en texte, et réévalue ce texte.
fn reevaluer_arbre(s: &str) -> Result<BigRational> {
    let mut lex = Lexer::new(s.as_bytes());
    let arbre = Parser::new(&mut lex).parse()?;
    let texte = arbre.to_string();
    let v = Evaluator::new(fonctions_standard()).eval(&arbre)?;
    assert_eq!(
        eval_expression(&texte).ok(),
        Some(v.clone()),
        "arbre réécrit: {texte:?} (source {s:?})"
    );
    Ok(v)
}

/* ------------------------ Génération d’expressions (bornée) ------------------------ */

fn gen_nombre(rng: &mut Rng) -> String {
    let ent = rng.pick(20);
    match rng.pick(4) {
        0 => format!("{ent}.{}", rng.pick(1000)),
        1 => format!("{ent}.0{}", rng.pick(10)),
        _ => format!("{ent}"),
    }
}

fn gen_blanc(rng: &mut Rng) -> &'static str {
    match rng.pick(8) {
        0 => " ",
        1 => "\n",
        2 => "\r\n",
        3 => "\t",
        _ => "",
    }
}

fn gen_expr(rng: &mut Rng, profondeur: u32) -> String {
    if profondeur == 0 {
        return gen_nombre(rng);
    }

    let p = profondeur - 1;
    match rng.pick(9) {
        0 | 1 => gen_nombre(rng),
        2 => {
            let op = ["+", "-", "*", "/"][rng.pick(4) as usize];
            format!(
                "{}{}{op}{}{}",
                gen_expr(rng, p),
                gen_blanc(rng),
                gen_blanc(rng),
                gen_expr(rng, p)
            )
        }
        3 => format!("({})", gen_expr(rng, p)),
        4 => {
            // un seul signe, devant une primaire
            let signe = if rng.coin() { "-" } else { "+" };
            format!("{signe}({})", gen_expr(rng, p))
        }
        5 => format!("floor({})", gen_expr(rng, p)),
        6 => format!("sqrt({})", gen_expr(rng, p)),
        7 => format!("scale({}, {})", rng.pick(6), gen_expr(rng, p)),
        _ => format!("{} * {}", gen_nombre(rng), gen_expr(rng, p)),
    }
}

/* ------------------------ Campagnes ------------------------ */

#[test]
fn fuzz_deterministe_et_reecriture() {
    let t0 = Instant::now();
    let mut rng = Rng::new(0x51_C0FFEE);

    let mut ok = 0usize;
    let mut attendues = 0usize;

    for _ in 0..400 {
        budget(t0, Duration::from_secs(20));

        let s = gen_expr(&mut rng, 4);

        let r1 = eval_expression(&s);
        let r2 = eval_expression(&s);

        match (r1, r2) {
            (Ok(a), Ok(b)) => {
                assert_eq!(a, b, "non déterministe: {s:?}");
                check_invariant_format(&a);
                let v = reevaluer_arbre(&s)
                    .unwrap_or_else(|e| panic!("réévaluation {s:?}: {e}"));
                assert_eq!(v, a, "s={s:?}");
                ok += 1;
            }
            (Err(e1), Err(e2)) => {
                assert!(is_erreur_attendue(&e1), "erreur inattendue {e1} pour {s:?}");
                assert_eq!(e1.to_string(), e2.to_string(), "non déterministe: {s:?}");
                attendues += 1;
            }
            (a, b) => panic!("non déterministe: {s:?} => {a:?} / {b:?}"),
        }
    }

    // la campagne doit réellement évaluer quelque chose
    assert!(ok > 0, "ok={ok} attendues={attendues}");
}

#[test]
fn fuzz_entree_tronquee_echoue_proprement() {
    // toute troncature d’une expression valide : soit une valeur, soit une erreur typée
    let t0 = Instant::now();
    let mut rng = Rng::new(42);

    for _ in 0..100 {
        budget(t0, Duration::from_secs(20));

        let s = gen_expr(&mut rng, 3);
        for coupe in 0..s.len() {
            if !s.is_char_boundary(coupe) {
                continue;
            }
            match eval_expression(&s[..coupe]) {
                Ok(v) => check_invariant_format(&v),
                Err(Error::Parse(_)) => {}
                Err(e) => assert!(is_erreur_attendue(&e), "{e} pour {:?}", &s[..coupe]),
            }
        }
    }
}

#[test]
fn fuzz_octets_invalides() {
    let mut rng = Rng::new(7);
    let interdits = [b'#', b'^', b'%', b'!', b'=', b'_', b'.'];

    for _ in 0..100 {
        let s = gen_expr(&mut rng, 2);
        let o = interdits[rng.pick(interdits.len() as u32) as usize];
        let texte = format!("{} {}", char::from(o), s);
        match eval_expression(&texte) {
            Err(Error::Lex { octet }) => assert_eq!(octet, o),
            autre => panic!("Lex attendu pour {texte:?}, obtenu {autre:?}"),
        }
    }
}
