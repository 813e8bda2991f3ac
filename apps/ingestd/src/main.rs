use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;
	let args = ingestd::Args::parse();
	ingestd::run(args).await
}
