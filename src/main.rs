use log::{debug, error};
use recipe_importer::{RecipeImporter, UnitSystem};
use std::env;
use std::error::Error;
use std::path::Path;

const USAGE: &str = "\
Usage:
  recipe-importer <url> [--units metric|imperial]
  recipe-importer --text <file> [--units metric|imperial]
  recipe-importer --file <path> [--mime <type>] [--units metric|imperial]";

/// Parsed command line
#[derive(Debug, Default)]
struct Args {
    url: Option<String>,
    text_file: Option<String>,
    document: Option<String>,
    mime: Option<String>,
    units: Option<UnitSystem>,
}

fn parse_args(args: &[String]) -> Result<Args, String> {
    let mut parsed = Args::default();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        let mut value = |flag: &str| {
            iter.next()
                .cloned()
                .ok_or_else(|| format!("{} needs a value", flag))
        };
        match arg.as_str() {
            "--text" => parsed.text_file = Some(value("--text")?),
            "--file" => parsed.document = Some(value("--file")?),
            "--mime" => parsed.mime = Some(value("--mime")?),
            "--units" => parsed.units = Some(value("--units")?.parse()?),
            "-h" | "--help" => return Err(USAGE.to_string()),
            flag if flag.starts_with("--") => return Err(format!("Unknown option {}", flag)),
            url => parsed.url = Some(url.to_string()),
        }
    }

    Ok(parsed)
}

/// MIME type from the file extension, for when --mime is not given
fn guess_mime(path: &str) -> &'static str {
    let extension = Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();
    match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "tif" | "tiff" => "image/tiff",
        "pdf" => "application/pdf",
        "txt" => "text/plain",
        _ => "application/octet-stream",
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let raw: Vec<String> = env::args().skip(1).collect();
    let args = parse_args(&raw)?;
    debug!("{:?}", args);

    let mut builder = RecipeImporter::builder();
    builder = if let Some(path) = &args.text_file {
        builder.text(tokio::fs::read_to_string(path).await?)
    } else if let Some(path) = &args.document {
        let bytes = tokio::fs::read(path).await?;
        let mime = args.mime.clone().unwrap_or_else(|| guess_mime(path).to_string());
        builder.document(bytes, mime)
    } else if let Some(url) = &args.url {
        builder.url(url.clone())
    } else {
        return Err(USAGE.into());
    };

    if let Some(system) = args.units {
        builder = builder.units(system);
    }

    match builder.build().await {
        Ok(recipe) => {
            println!("{}", serde_json::to_string_pretty(&recipe)?);
            Ok(())
        }
        Err(e) => {
            error!("Import failed: {}", e);
            Err(e.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_url_and_units() {
        let parsed = parse_args(&args(&["https://example.com/r", "--units", "metric"])).unwrap();
        assert_eq!(parsed.url.as_deref(), Some("https://example.com/r"));
        assert_eq!(parsed.units, Some(UnitSystem::Metric));
    }

    #[test]
    fn test_parse_document() {
        let parsed = parse_args(&args(&["--file", "card.JPG"])).unwrap();
        assert_eq!(parsed.document.as_deref(), Some("card.JPG"));
        assert_eq!(guess_mime("card.JPG"), "image/jpeg");
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_args(&args(&["--text"])).is_err());
        assert!(parse_args(&args(&["--units", "cubits"])).is_err());
        assert!(parse_args(&args(&["--verbose"])).is_err());
    }
}
