use clap::Parser;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    days_before: u32,

    days_after: u32,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let report = process::audit_catalog(args.days_before, args.days_after)?;

    if !report.is_clean() {
        std::process::exit(1);
    }

    Ok(())
}
