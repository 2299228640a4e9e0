//! Pieces command - list the catalogue

use anyhow::Result;
use clap::Args;

use happyhex_core::{HexEngine, HexGrid, Shape, MAX_RADIUS, SHAPES};

#[derive(Args)]
pub struct PiecesArgs {
    /// Board radius used to count placements on an empty board
    #[arg(long, default_value = "5", value_parser = clap::value_parser!(i32).range(1..=MAX_RADIUS as i64))]
    pub radius: i32,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(serde::Serialize)]
struct PieceInfo {
    index: usize,
    name: &'static str,
    size: usize,
    bits: u8,
    placements: usize,
}

/// Run pieces command
pub fn run(args: PiecesArgs) -> Result<()> {
    let board = HexEngine::new(args.radius)?;
    let infos = SHAPES
        .iter()
        .enumerate()
        .map(|(index, shape)| describe(index, shape, &board))
        .collect::<Result<Vec<_>>>()?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&infos)?);
        return Ok(());
    }

    for (info, shape) in infos.iter().zip(SHAPES.iter()) {
        println!(
            "{:>2} {:<16} size {} bits 0x{:02X} placements {}",
            info.index, info.name, info.size, info.bits, info.placements
        );
        print!("{}", render(shape)?);
    }
    Ok(())
}

fn describe(index: usize, shape: &Shape, board: &HexEngine) -> Result<PieceInfo> {
    let piece = shape.piece(0);
    Ok(PieceInfo {
        index,
        name: shape.name,
        size: piece.len(),
        bits: piece.to_bits()?,
        placements: board.placement_count(&piece),
    })
}

/// Draw the shape on the smallest board that holds it
fn render(shape: &Shape) -> Result<String> {
    let mut board = HexEngine::new(2)?;
    let center = board.center();
    board.add(center, &shape.piece(0))?;
    Ok(board.to_string())
}
