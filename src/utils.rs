use time::macros::format_description;
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::EnvFilter;
use url::Url;

pub fn setup_logging(verbose: bool) {
    let level = if verbose { "info" } else { "error" };
    let timer = UtcTime::new(format_description!(
        "[year]-[month]-[day]T[hour]:[minute]:[second]Z"
    ));

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::new(level))
        .with_timer(timer)
        .with_target(false)
        .try_init()
        .ok();
}

pub fn validate_args(args: &crate::args::Args) -> anyhow::Result<()> {
    let endpoint = Url::parse(&args.endpoint)
        .map_err(|e| anyhow::anyhow!("--endpoint is not a valid URL: {}", e))?;

    if !matches!(endpoint.scheme(), "http" | "https") {
        anyhow::bail!("--endpoint must use http or https, got '{}'", endpoint.scheme());
    }

    if !args.output_dir.is_dir() {
        anyhow::bail!("--output-dir {:?} is not a directory", args.output_dir);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::Args;
    use clap::Parser;

    fn args(extra: &[&str]) -> Args {
        Args::parse_from(std::iter::once("wikidata-stats").chain(extra.iter().copied()))
    }

    #[test]
    fn defaults_are_valid() {
        let args = args(&[]);
        assert_eq!(args.endpoint, crate::args::DEFAULT_ENDPOINT);
        assert!(validate_args(&args).is_ok());
    }

    #[test]
    fn rejects_non_http_endpoint() {
        let err = validate_args(&args(&["--endpoint", "ftp://example.org/api.php"])).unwrap_err();
        assert!(err.to_string().contains("http or https"));
    }

    #[test]
    fn rejects_unparseable_endpoint() {
        assert!(validate_args(&args(&["--endpoint", "not a url"])).is_err());
    }

    #[test]
    fn rejects_missing_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        let missing = missing.to_str().unwrap();
        assert!(validate_args(&args(&["--output-dir", missing])).is_err());
    }
}
