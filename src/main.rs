use clap::Parser;

use remux_audio::{
    cli::{handle_commands, process_inputs, CliArgs},
    config::Config,
    utils::{setup_logging, Result},
};

#[tokio::main]
async fn main() -> Result<()> {
    let args = CliArgs::parse();

    if !args.is_info_command() && args.input.is_empty() {
        use clap::CommandFactory;
        let mut cmd = CliArgs::command();
        cmd.print_help()?;
        println!();
        return Ok(());
    }

    args.validate()?;

    let config = Config::load_with_fallback(args.config.as_deref())?;

    setup_logging(
        args.get_log_level(&config.logging.level),
        config.logging.show_timestamps,
        config.logging.colored_output && args.should_use_color(),
    )?;

    if handle_commands(&args, &config).await? {
        return Ok(());
    }

    process_inputs(&args, &config).await
}
