use robdd_rs::bdd::Bdd;
use robdd_rs::formula::{Formula, Interpretation};
use robdd_rs::order::VarOrder;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    simplelog::TermLogger::init(
        simplelog::LevelFilter::Debug,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    // f = p ∨ (q ∧ r)
    let f = Formula::or(
        Formula::var("p"),
        Formula::and(Formula::var("q"), Formula::var("r")),
    );
    println!("f = {}", f);

    let mut bdd = Bdd::build(&f, Some(VarOrder::new(["p", "q", "r"])))?;
    println!("bdd = {:?}", bdd);
    println!("structure = {}", bdd.to_bracket_string());

    let stats = bdd.reduce();
    println!("reduce stats = {:?}", stats);
    println!("structure = {}", bdd.to_bracket_string());

    println!("satisfiable = {}", bdd.is_satisfiable());
    println!("valid = {}", bdd.is_valid());
    println!("nodes = {}", bdd.count_nodes());

    for (pv, qv, rv) in [(false, true, true), (true, false, false), (false, true, false)] {
        let interp: Interpretation =
            [("p", pv), ("q", qv), ("r", rv)].into_iter().collect();
        println!("f(p={}, q={}, r={}) = {}", pv, qv, rv, bdd.evaluate(&interp)?);
    }

    // Negation and equivalence: ¬¬f ≡ f.
    let back = bdd.not().not();
    println!("¬¬f ≡ f: {}", bdd.equivalent(&back)?);

    Ok(())
}
