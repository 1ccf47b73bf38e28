//! Diagnostic command-line harness for the engine core: load a position,
//! run perft, print the static evaluation, or list legal moves. The
//! search/UCI front-end is a separate concern and deliberately not
//! reimplemented here.

use vantage::board::Board;
use vantage::eval::pkcache::PawnKingTable;
use vantage::moves::execute::generate_legal;
use vantage::moves::magic::loader::load_magic_tables;
use vantage::moves::perft::perft_divide;
use std::io::{self, BufRead};
use std::str::FromStr;

fn main() {
    #[cfg(feature = "cli")]
    vantage::logger::init_logging("logs/cli.log", "info");

    let tables = load_magic_tables();
    let mut board = Board::new();
    let mut pk_table = PawnKingTable::new();

    println!("vantage cli -- type 'help' for commands");

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l.trim().to_string(),
            Err(_) => break,
        };
        if line.is_empty() {
            continue;
        }
        let parts: Vec<&str> = line.split_whitespace().collect();
        match parts[0] {
            "help" => print_help(),
            "quit" | "exit" => break,
            "new" => board = Board::new(),
            "fen" => {
                if parts.len() > 1 {
                    let fen = parts[1..].join(" ");
                    match Board::from_str(&fen) {
                        Ok(b) => board = b,
                        Err(e) => println!("invalid fen: {e}"),
                    }
                } else {
                    println!("{}", board.to_fen());
                }
            }
            "d" | "display" => println!("{}", board),
            "eval" => {
                let score = vantage::eval::evaluate(&board, &tables, &mut pk_table);
                println!("static eval (side to move): {score}");
            }
            "moves" => {
                let mut legal = Vec::with_capacity(64);
                let mut scratch = Vec::with_capacity(256);
                generate_legal(&mut board, &tables, &mut legal, &mut scratch);
                for mv in &legal {
                    println!("{}", mv.to_uci());
                }
                println!("{} legal moves", legal.len());
            }
            "perft" => {
                let depth: u32 = parts.get(1).and_then(|s| s.parse().ok()).unwrap_or(4);
                let total = perft_divide(&mut board, &tables, depth);
                println!("total: {total}");
            }
            other => println!("unknown command: {other} (try 'help')"),
        }
    }
}

fn print_help() {
    println!("commands:");
    println!("  fen [FEN]   - load a position, or print the current one");
    println!("  d           - display the board as FEN");
    println!("  moves       - list legal moves from the current position");
    println!("  eval        - print the static evaluation");
    println!("  perft N     - run perft to depth N from the current position");
    println!("  new         - reset to the starting position");
    println!("  quit        - exit");
}
