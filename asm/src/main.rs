use color_print::{cformat, cprintln};
use rvasm::error::Error;

const HELP_TEMPLATE: &str = "\
{before-help}{bin} {version}
  {about}

{usage-heading}
{tab}{usage}

{all-args}{after-help}";

#[derive(Debug, clap::Parser)]
#[clap(version, about, help_template = HELP_TEMPLATE)]
struct Args {
    /// Input assembly file
    #[clap(default_value = "main.s")]
    input: String,

    /// Write the encoded words as little-endian bytes
    #[clap(short, long)]
    output: Option<String>,
}

fn main() {
    use clap::Parser;
    use std::io::{BufRead, Write};

    let args: Args = Args::parse();

    let file = match std::fs::File::open(&args.input) {
        Ok(file) => file,
        Err(e) => {
            cprintln!("<red,bold>error</>: {}", Error::FileOpen(args.input.clone(), e));
            std::process::exit(1);
        }
    };
    let lines: Vec<String> = match std::io::BufReader::new(file)
        .lines()
        .collect::<Result<_, _>>()
    {
        Ok(lines) => lines,
        Err(e) => {
            cprintln!("<red,bold>error</>: {}", Error::FileRead(e));
            std::process::exit(1);
        }
    };

    let records = match rvasm::assemble(&lines) {
        Ok(records) => records,
        Err(err) => {
            err.print_diag(&args.input);
            std::process::exit(1);
        }
    };

    cprintln!("<bold>address  | word     | binary                           | source</>");
    cprintln!("---------+----------+----------------------------------+-----------------");
    for r in &records {
        println!(
            "{} | {} | {} | {}",
            cformat!("<blue>{}</>", r.addr_hex()),
            cformat!("<yellow>{}</>", r.word_hex()),
            r.word_bin(),
            r.source
        );
    }

    if let Some(path) = &args.output {
        let mut file = match std::fs::File::create(path) {
            Ok(file) => file,
            Err(e) => {
                cprintln!("<red,bold>error</>: {}", Error::FileOpen(path.clone(), e));
                std::process::exit(1);
            }
        };
        for r in &records {
            if let Err(e) = file.write_all(&r.word.to_le_bytes()) {
                cprintln!("<red,bold>error</>: Failed to write file: {path}: {e}");
                std::process::exit(1);
            }
        }
        println!("  > {path}");
    }
}
