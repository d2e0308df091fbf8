use crate::{
    cli::CliArgs,
    config::{visible_fields, Config},
    plugin::{FileTestRequest, RemuxPlugin, WorkerRequest},
    utils::{find_media_files, Error, FfmpegWrapper, Result, ToolRunner},
};
use tracing::{info, warn};

pub async fn handle_commands(args: &CliArgs, config: &Config) -> Result<bool> {
    if args.show_settings {
        show_settings(args, config);
        return Ok(true);
    }

    if args.validate_config {
        validate_config(args.config.as_deref()).await?;
        return Ok(true);
    }

    Ok(false)
}

fn show_settings(args: &CliArgs, config: &Config) {
    let settings = config.settings_for(args.library_id);
    let resolved = settings.resolve();

    match args.library_id {
        Some(id) if config.libraries.contains_key(&id) => println!("Settings for library {}:", id),
        Some(id) => println!("Library {} has no own settings, using global:", id),
        None => println!("Global settings:"),
    }
    println!("{:-<50}", "");

    for field in visible_fields(settings) {
        let value = match field.key {
            "audio_codecs" => settings.audio_codecs.clone(),
            "input_file_ext" => settings.input_file_ext.clone(),
            "output_ext" => settings.output_ext.clone(),
            "advanced" => settings.advanced.to_string(),
            "main_options" => settings.main_options.clone(),
            "advanced_options" => settings.advanced_options.clone(),
            _ => String::new(),
        };
        println!("{:<40} {}", field.label, value);
    }

    let codecs: Vec<_> = resolved.audio_codecs.into_iter().collect();
    let extensions: Vec<_> = resolved.input_file_ext.into_iter().collect();

    println!("{:-<50}", "");
    println!("Codecs matched: {}", codecs.join(", "));
    println!("Extensions tested: {}", extensions.join(", "));
}

async fn validate_config(config_path: Option<&std::path::Path>) -> Result<()> {
    match Config::load_with_fallback(config_path) {
        Ok(config) => {
            if let Some(path) = config_path {
                println!("✓ Configuration file is valid: {}", path.display());
            } else {
                println!("✓ Configuration is valid (using discovered/default config)");
            }
            println!();

            println!("Configuration Summary:");
            println!("{:-<40}", "");
            println!("FFmpeg: {}", config.tools.ffmpeg);
            println!("FFprobe: {}", config.tools.ffprobe);
            println!("Audio codecs: {}", config.remux.audio_codecs);
            println!("Output extension: {}", config.remux.output_ext);
            println!("Library overrides: {}", config.libraries.len());

            Ok(())
        }
        Err(e) => {
            println!("✗ Configuration validation failed: {}", e);
            println!();
            println!("Common issues:");
            println!("  - Check YAML syntax and indentation");
            println!("  - Output extensions must not contain path separators");
            println!("  - timeout_seconds must be greater than 0");
            Err(e)
        }
    }
}

/// Runs both passes over every input and prints or executes the planned commands.
pub async fn process_inputs(args: &CliArgs, config: &Config) -> Result<()> {
    let ffmpeg = FfmpegWrapper::new(config.tools.ffmpeg.clone(), config.tools.ffprobe.clone());
    ffmpeg.check_availability().await?;

    let settings = config.settings_for(args.library_id).resolve();
    let mut files = Vec::new();
    for input in &args.input {
        files.extend(find_media_files(input, &settings.input_file_ext)?);
    }

    if files.is_empty() {
        warn!("No eligible media files found");
        return Ok(());
    }

    let plugin = RemuxPlugin::new(config.clone(), ffmpeg);
    let runner = ToolRunner::new(config.tools.timeout_seconds);

    let mut planned = 0;
    let mut failed_files = Vec::new();

    for (index, path) in files.iter().enumerate() {
        info!(
            "Testing file {}/{}: {}",
            index + 1,
            files.len(),
            path.display()
        );

        let test = plugin
            .on_library_management_file_test(FileTestRequest {
                library_id: args.library_id,
                ..FileTestRequest::new(path)
            })
            .await;
        if !test.add_file_to_pending_tasks {
            continue;
        }

        let work = plugin
            .on_worker_process(WorkerRequest {
                library_id: args.library_id,
                shared_info: test.shared_info,
                ..WorkerRequest::new(path, path)
            })
            .await;
        if !work.is_planned() {
            continue;
        }
        planned += 1;

        if !args.execute {
            println!("{}", work.exec_command.join(" "));
            continue;
        }

        match runner.run(&work.exec_command, Some(&work.file_out)).await {
            Ok(_) => info!("✓ Remuxed: {}", work.file_out.display()),
            Err(e) => {
                let error_msg = format!("Failed to remux {}: {}", path.display(), e);
                tracing::error!("{}", error_msg);
                failed_files.push(error_msg);
            }
        }
    }

    info!(
        "Tested {} file(s): {} remux(es) planned, {} failed",
        files.len(),
        planned,
        failed_files.len()
    );

    if planned > 0 && failed_files.len() == planned {
        return Err(Error::ffmpeg("All remuxes failed"));
    }

    Ok(())
}
