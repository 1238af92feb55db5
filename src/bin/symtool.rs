use barcode2d::{ECLevel, Symbol, Symbology, datamatrix::Gs1Policy};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "symtool", version, about = "barcode2d CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Encode content as a Data Matrix symbol and print it
    Datamatrix {
        content: String,
        /// Force a symbol with this many rows
        #[arg(long)]
        rows: Option<usize>,
        /// Treat content as GS1 element strings
        #[arg(long)]
        gs1: bool,
    },
    /// Encode content as a QR symbol and print it
    Qr {
        content: String,
        /// Error correction level: l, m, q or h
        #[arg(long, default_value = "m")]
        level: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Command::Datamatrix { content, rows, gs1 } => barcode2d::encode(
            &content,
            Symbology::DataMatrix {
                fixed_rows: rows,
                gs1: gs1.then_some(Gs1Policy::Strict),
            },
        ),
        Command::Qr { content, level } => {
            let level = match level.to_ascii_lowercase().as_str() {
                "l" => ECLevel::L,
                "m" => ECLevel::M,
                "q" => ECLevel::Q,
                "h" => ECLevel::H,
                other => {
                    eprintln!("unknown error correction level: {other}");
                    std::process::exit(2);
                }
            };
            barcode2d::encode(&content, Symbology::Qr { level })
        }
    };

    match result {
        Ok(symbol) => print_symbol(&symbol),
        Err(err) => {
            eprintln!("encode failed: {err}");
            std::process::exit(1);
        }
    }
}

fn print_symbol(symbol: &Symbol) {
    for y in 0..symbol.height() {
        let mut line = String::with_capacity(symbol.width() * 2);
        for x in 0..symbol.width() {
            line.push_str(if symbol.module(x, y) { "██" } else { "  " });
        }
        println!("{line}");
    }
}
