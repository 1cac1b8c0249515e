use clap::Parser;
use env_logger::Env;
use rustyline::{error::ReadlineError, DefaultEditor, Result};
use xxiv::{Puzzle, Solution, TARGET};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Value the expressions must reach
    #[arg(short, long, default_value_t = TARGET)]
    target: i64,

    /// Print every distinct solution instead of the simplest one
    #[arg(short, long)]
    all: bool,

    /// Print the generated, fully parenthesized form
    #[arg(short, long)]
    raw: bool,

    /// Only use + - * /
    #[arg(long)]
    no_factorial: bool,

    /// Four cards to solve once; starts a prompt when omitted
    numbers: Vec<i64>,
}

impl Args {
    fn show(&self, solution: &Solution) -> String {
        if self.raw {
            solution.text().to_owned()
        } else {
            solution.rendered()
        }
    }

    fn run(&self, numbers: &[i64]) {
        let puzzle = match Puzzle::new(numbers) {
            Ok(puzzle) => puzzle.with_target(self.target),
            Err(error) => {
                println!("error: {error}");
                return;
            }
        };
        let puzzle = if self.no_factorial {
            puzzle.arithmetic_only()
        } else {
            puzzle
        };
        let solutions = puzzle.solve();
        let target = puzzle.target();
        if self.all {
            for solution in &solutions {
                println!("{}={target}", self.show(solution));
            }
            println!(
                "[{} solution{}]",
                solutions.len(),
                if solutions.len() == 1 { "" } else { "s" }
            );
        } else {
            match solutions.simplest() {
                Some(solution) => println!("{}={target}", self.show(solution)),
                None => println!("no solution"),
            }
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();
    let args = Args::parse();
    if !args.numbers.is_empty() {
        args.run(&args.numbers);
        return Ok(());
    }

    let mut rl = DefaultEditor::new()?;
    println!("Enter four integers from 1 to 13 separated by spaces:");
    loop {
        match rl.readline(">> ") {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                rl.add_history_entry(line)?;
                match line
                    .split_whitespace()
                    .map(str::parse)
                    .collect::<std::result::Result<Vec<i64>, _>>()
                {
                    Ok(numbers) => args.run(&numbers),
                    Err(error) => println!("error: {error}"),
                }
                println!();
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(error) => Err(error)?,
        }
    }
    Ok(())
}
