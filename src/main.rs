use KiRate::Examples::rate_examples::rate_examples;
use KiRate::Kinetics::kinetics_error::KineticsError;
use KiRate::Kinetics::reaction_model::ReactionModel;
use KiRate::constants::P0;
use log::{error, info};
use prettytable::{Cell, Row, Table};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

/// forward rate coefficients of every reaction of the model over a temperature grid
fn summarize(path: &str) -> Result<(), KineticsError> {
    let model = ReactionModel::load_from_file(path)?;
    info!(
        "loaded {} species and {} reactions from {}",
        model.species.len(),
        model.reactions.len(),
        path
    );
    model.stoichiometry_table()?.printstd();
    let Tlist = [300.0, 500.0, 1000.0, 1500.0, 2000.0];
    let mut table = Table::new();
    let mut header = vec![Cell::new("reaction")];
    header.extend(Tlist.iter().map(|T| Cell::new(&format!("k({} K)", T))));
    table.add_row(Row::new(header));
    for reaction in &model.reactions {
        let mut row = vec![Cell::new(&reaction.equation(&model.species)?)];
        for &T in &Tlist {
            let k = match reaction.get_rate_coefficient(T, P0) {
                Ok(k) => format!("{:.4e}", k),
                Err(e) => {
                    info!("{} at {} K: {}", reaction, T, e);
                    "-".to_string()
                }
            };
            row.push(Cell::new(&k));
        }
        table.add_row(Row::new(row));
    }
    table.printstd();
    Ok(())
}

pub fn main() {
    if let Err(e) = TermLogger::init(
        LevelFilter::Info,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    ) {
        eprintln!("logger is not available: {}", e);
    }
    let result = match std::env::args().nth(1) {
        Some(path) => summarize(&path),
        None => (0..5).try_for_each(rate_examples),
    };
    if let Err(e) = result {
        error!("{}", e);
        std::process::exit(1);
    }
}
