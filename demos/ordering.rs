//! Variable-order sensitivity: (x1 ∧ y1) ∨ ... ∨ (xn ∧ yn) stays linear
//! under an interleaved order and grows exponentially under a blocked one.

use clap::Parser;

use robdd_rs::bdd::Bdd;
use robdd_rs::formula::Formula;
use robdd_rs::order::VarOrder;

#[derive(Debug, Parser)]
#[command(author, version)]
struct Cli {
    /// Number of (xi ∧ yi) pairs.
    #[arg(value_name = "INT", default_value = "4")]
    n: usize,
}

fn pairs_formula(n: usize) -> Formula {
    let mut f = Formula::and(Formula::var("x1"), Formula::var("y1"));
    for i in 2..=n {
        f = Formula::or(
            f,
            Formula::and(
                Formula::var(format!("x{}", i)),
                Formula::var(format!("y{}", i)),
            ),
        );
    }
    f
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    simplelog::TermLogger::init(
        simplelog::LevelFilter::Info,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let args = Cli::parse();
    println!("args = {:?}", args);
    let n = args.n;

    let f = pairs_formula(n);
    println!("f = {}", f);

    let interleaved: VarOrder = (1..=n)
        .flat_map(|i| [format!("x{}", i), format!("y{}", i)])
        .collect();
    let blocked: VarOrder = (1..=n)
        .map(|i| format!("x{}", i))
        .chain((1..=n).map(|i| format!("y{}", i)))
        .collect();

    for (label, order) in [("interleaved", interleaved), ("blocked", blocked)] {
        let time = std::time::Instant::now();
        let mut bdd = Bdd::build(&f, Some(order.clone()))?;
        let stats = bdd.reduce();
        println!(
            "{} {}: {} nodes after reduction ({} removed, {} merged) in {:.3} s",
            label,
            order,
            bdd.count_nodes(),
            stats.nodes_removed,
            stats.nodes_merged,
            time.elapsed().as_secs_f64()
        );
    }

    Ok(())
}
