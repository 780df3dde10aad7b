// src/main.rs
//
// Calculatrice Q — point d’entrée ligne de commande
// -------------------------------------------------
// - EXPR en argument, sinon lecture de l’entrée standard (une valeur par expression)
// - Résultats sur stdout, journaux et erreurs sur stderr
// - Première erreur => message + code de sortie non nul

use std::io;
use std::process::ExitCode;

use clap::{ArgAction, Parser};
use tracing_subscriber::EnvFilter;

use calculatrice_q::app::{executer, Affichage};
use calculatrice_q::noyau::{fonctions_standard, Lexer};

/// Évaluateur d’expressions sur les rationnels exacts
/// (+ - * /, parenthèses, sqrt(x), floor(x), scale(n, x)).
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Expression(s) à évaluer ; sans argument, lit l’entrée standard.
    expr: Option<String>,

    /// Affiche les résultats non entiers en fraction exacte n/d.
    #[arg(short, long)]
    fraction: bool,

    /// Journaux plus bavards (-v : debug, -vv : trace). RUST_LOG a priorité.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn installer_journal(verbose: u8) {
    let defaut = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filtre = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(defaut));

    tracing_subscriber::fmt()
        .with_env_filter(filtre)
        .with_writer(io::stderr)
        .init();
}

fn lancer(args: &Args) -> anyhow::Result<usize> {
    let affichage = if args.fraction {
        Affichage::Fraction
    } else {
        Affichage::Decimal
    };

    let stdout = io::stdout();
    let mut sortie = stdout.lock();

    match &args.expr {
        Some(texte) => {
            let mut lex = Lexer::new(texte.as_bytes());
            executer(&mut lex, fonctions_standard(), affichage, &mut sortie)
        }
        None => {
            let mut lex = Lexer::new(io::stdin().lock());
            executer(&mut lex, fonctions_standard(), affichage, &mut sortie)
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    installer_journal(args.verbose);

    match lancer(&args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("[ERREUR]\t{e:#}");
            ExitCode::FAILURE
        }
    }
}
