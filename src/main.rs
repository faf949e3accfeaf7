use anyhow::Result;

mod app;
mod logging;

fn main() -> Result<()> {
    let args = xor_sweep::cli::parse();
    app::run(args)
}
