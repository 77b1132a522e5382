use clap::Parser;
use std::process::ExitCode;
use std::sync::Arc;

use directory_thumbnailer::domain::repositories::OverlayIconSource;
use directory_thumbnailer::infrastructure::directory::LocalDirectoryReader;
use directory_thumbnailer::infrastructure::overlay::{FileOverlayIcon, ThemedFolderIcon};
use directory_thumbnailer::infrastructure::persistence::PngThumbnailWriter;
use directory_thumbnailer::infrastructure::thumbnail_cache::FreedesktopThumbnailProvider;
use directory_thumbnailer::presentation::cli::{Cli, init_logging};
use directory_thumbnailer::{ExitStatus, ThumbnailDirectoryUseCase, ThumbnailRequest, ThumbnailerError};

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let status = if e.use_stderr() {
                ExitStatus::InvalidOptions
            } else {
                ExitStatus::Success
            };
            if let Err(print_err) = e.print() {
                eprintln!("Couldn't print usage: {print_err}");
            }
            return ExitCode::from(status.code());
        }
    };

    if let Err(e) = init_logging(cli.verbose, cli.debug) {
        eprintln!("Couldn't set up logging: {e:#}");
    }

    let request = match cli.to_request() {
        Ok(request) => request,
        Err(e) => {
            eprintln!("Invalid input directory '{}': {e}", cli.input);
            return ExitCode::from(ExitStatus::InvalidOptions.code());
        }
    };

    match build_use_case(&cli, &request).and_then(|use_case| use_case.execute(&request)) {
        Ok(_) => ExitCode::from(ExitStatus::Success.code()),
        Err(e) => {
            if e.is_save_error() {
                eprintln!("Couldn't save thumbnail to '{}': {e}", request.output.display());
            } else {
                eprintln!(
                    "Couldn't generate thumbnail for directory '{}': {e}",
                    request.input.display()
                );
            }
            ExitCode::from(e.exit_code())
        }
    }
}

fn build_use_case(
    cli: &Cli,
    request: &ThumbnailRequest,
) -> Result<ThumbnailDirectoryUseCase, ThumbnailerError> {
    let cache_root = cli.cache_root().ok_or_else(|| {
        ThumbnailerError::InvalidArguments(
            "no thumbnail cache directory found, pass --thumbnail-cache".to_string(),
        )
    })?;

    let mut provider = FreedesktopThumbnailProvider::new(cache_root, request.size_class());
    match std::env::current_exe() {
        Ok(program) => provider = provider.with_directory_program(program),
        Err(e) => {
            tracing::warn!(error = %e, "Couldn't locate own executable, subdirectories can't be thumbnailed");
        }
    }

    let overlay: Arc<dyn OverlayIconSource> = match &cli.overlay_icon {
        Some(path) => Arc::new(FileOverlayIcon::new(path)),
        None => Arc::new(ThemedFolderIcon::new()),
    };

    Ok(ThumbnailDirectoryUseCase::new(
        Arc::new(LocalDirectoryReader::new()),
        Arc::new(provider),
        overlay,
        Arc::new(PngThumbnailWriter::new()),
    ))
}
