use anyhow::{Context, Result};
use clap::Parser;
use fakeboard_core::{Board, BoardConfig};
use log::{error, info};

mod config;
mod script;
mod selftest;

use config::{Args, Command};

fn bring_up(config: BoardConfig) -> Result<Board> {
    info!("Bringing up board (store version {}, {:?} ids)", config.store_version, config.id_policy);
    let mut board = Board::new(config);
    if let Err(err) = board.initialize() {
        error!("Board initialization failed: {} ({})", err, err.strerror());
        return Err(err).context("Board initialization failed");
    }
    Ok(board)
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let config = args.board_config()?;

    match &args.command {
        Command::Selftest => selftest::run_all()?,
        Command::Info => {
            let board = bring_up(config)?;
            for id in 0..board.device_count() {
                println!("{:>2}  {:<16} {:>4} words", id, board.device_name(id)?, board.device_size(id)?);
            }
        }
        Command::Exec { ops } => {
            let ops = script::parse_script(ops)?;
            let mut board = bring_up(config)?;
            for op in ops {
                match script::execute(&mut board, op) {
                    Ok(lines) => {
                        for line in lines {
                            println!("{}: {}", op, line);
                        }
                    }
                    Err(err) => println!("{}: failed: {} ({})", op, err, err.strerror()),
                }
            }
        }
    }

    Ok(())
}
