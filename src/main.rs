use anyhow::{Result, bail};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use kira_stagesqc::cli::{Cli, Commands, ReferenceCommand, ReferenceShowArgs, RunArgs, ValidateArgs};
use kira_stagesqc::ctx::{Ctx, RunOptions};
use kira_stagesqc::io;
use kira_stagesqc::pipeline::Pipeline;
use kira_stagesqc::pipeline::stage1_input::Stage1Input;
use kira_stagesqc::pipeline::stage2_reference::{Stage2Reference, load_reference};
use kira_stagesqc::pipeline::stage3_classify::Stage3Classify;
use kira_stagesqc::session::{DecisionKey, Session, parse_choice};
use kira_stagesqc::symbols::corrections::FamilyChoice;
use kira_stagesqc::symbols::{DateFormat, Granularity};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run(args) => handle_run(args)?,
        Commands::Validate(args) => handle_validate(args)?,
        Commands::Reference(args) => match args.command {
            ReferenceCommand::Show(show) => handle_reference_show(show)?,
        },
    }

    Ok(())
}

fn handle_run(args: RunArgs) -> Result<()> {
    let mut session = match &args.session {
        Some(path) if path.exists() => Session::load(path)?,
        _ => Session::new(),
    };
    apply_decisions(&mut session, &args)?;

    let options = RunOptions {
        use_adjusted_pval: args.use_adjusted_pval,
        write_json: args.json,
        write_tsv: args.tsv,
    };
    let mut ctx = Ctx::new(
        args.input,
        args.out,
        args.reference,
        session,
        args.session,
        options,
        env!("CARGO_PKG_VERSION"),
    );
    Pipeline::full().run(&mut ctx)?;
    print_summary(&ctx)?;

    if !ctx.pending.is_empty() {
        let mut flags: Vec<&str> = ctx.pending.iter().map(|d| d.key.flag()).collect();
        flags.sort();
        flags.dedup();
        bail!(
            "{} decision(s) pending; rerun with {} (or --choice DATASET:KEY=VALUE, or --accept-defaults)",
            ctx.pending.len(),
            flags.join(", ")
        );
    }
    Ok(())
}

/// Session precedence: stored file, then defaults for unset keys, then flags.
fn apply_decisions(session: &mut Session, args: &RunArgs) -> Result<()> {
    if args.accept_defaults {
        session.initialise_defaults();
    }
    if let Some(v) = args.first_mar01 {
        session.save(DecisionKey::FirstMar01, FamilyChoice::from(v).symbol())?;
    }
    if let Some(v) = args.first_mar02 {
        session.save(DecisionKey::FirstMar02, FamilyChoice::from(v).symbol())?;
    }
    if let Some(v) = args.date_format {
        session.save(DecisionKey::DateFormat, DateFormat::from(v).as_str())?;
    }
    if let Some(v) = args.granularity {
        session.save(DecisionKey::Granularity, Granularity::from(v).as_str())?;
    }
    for spec in &args.choice {
        let (dataset, key, value) = parse_choice(spec)?;
        session.save_for(&dataset, key, &value)?;
    }
    Ok(())
}

fn handle_validate(args: ValidateArgs) -> Result<()> {
    let mut ctx = Ctx::new(
        args.input,
        PathBuf::from("."),
        args.reference,
        Session::new(),
        None,
        RunOptions::default(),
        env!("CARGO_PKG_VERSION"),
    );
    let pipeline = Pipeline::new(vec![
        Box::new(Stage1Input::new()),
        Box::new(Stage2Reference::new()),
        Box::new(Stage3Classify::new()),
    ]);
    pipeline.run(&mut ctx)?;
    print!("{}", io::summary::format_validate_summary(&ctx)?);
    Ok(())
}

fn handle_reference_show(args: ReferenceShowArgs) -> Result<()> {
    let reference = load_reference(args.reference.as_deref())?;
    println!("reference: {} ({} entries)", reference.source, reference.len());
    if args.symbols.is_empty() {
        for (previous, current) in reference.iter() {
            println!("{}\t{}", previous, current);
        }
        return Ok(());
    }
    for symbol in &args.symbols {
        let upper = symbol.trim().to_uppercase();
        match reference.current_symbol(&upper) {
            Some(current) => println!("{}\t{}", upper, current),
            None => println!("{}\t(current)", upper),
        }
    }
    Ok(())
}

fn print_summary(ctx: &Ctx) -> Result<()> {
    let summary = io::summary::format_summary(ctx)?;
    print!("{}", summary);
    if !ctx.warnings.is_empty() {
        println!("warnings:");
        for warning in &ctx.warnings {
            println!("- {}", warning);
        }
    }
    Ok(())
}
