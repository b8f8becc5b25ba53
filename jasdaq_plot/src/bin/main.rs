use color_eyre::Report;
use jasdaq_plot::Config;

fn main() -> Result<(), Report> {
    color_eyre::install()?;

    // logs are off unless `RUST_LOG` says otherwise
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    jasdaq_plot::visualize(&Config::default())?;
    println!("Visualization complete!");
    Ok(())
}
