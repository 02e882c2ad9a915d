//! CLI argument parsing with clap.

use clap::Parser;

/// Mandala art generator - black and white mandalas from one word of inspiration.
#[derive(Parser, Debug)]
#[command(name = "mandala", version, about)]
pub struct Cli {
    /// Word for inspiration (e.g., ocean, serenity, forest, cosmos).
    pub word: Option<String>,

    /// `OpenAI` API key (falls back to `OPENAI_API_KEY`, then the config file).
    #[arg(short = 'k', long)]
    pub api_key: Option<String>,

    /// Output file path (auto-generated if not specified). One-shot only.
    #[arg(short, long, conflicts_with = "interactive")]
    pub output: Option<String>,

    /// Directory for auto-named images (overrides the config file).
    #[arg(short = 'd', long)]
    pub output_dir: Option<String>,

    /// Also print a `data:` URI that downloads the image. One-shot only.
    #[arg(long, conflicts_with = "interactive")]
    pub data_uri: bool,

    /// Start an interactive session (the default when no word is given).
    #[arg(short, long)]
    pub interactive: bool,

    /// Config file path override.
    #[arg(long)]
    pub config: Option<String>,

    /// Verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// True when the session should read further words from stdin.
    #[must_use]
    pub fn is_interactive(&self) -> bool {
        self.interactive || self.word.is_none()
    }

    /// Reject one-shot flags when the session will be interactive.
    ///
    /// clap catches `-i` together with these flags; this also covers the
    /// implicit interactive mode entered when no word is given.
    ///
    /// # Errors
    ///
    /// Returns an error naming the offending flag.
    pub fn check_mode(&self) -> Result<(), String> {
        if !self.is_interactive() {
            return Ok(());
        }
        if self.output.is_some() {
            return Err("--output needs a word; in an interactive session use :save".into());
        }
        if self.data_uri {
            return Err("--data-uri needs a word; in an interactive session use :link".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positional_word() {
        let cli = Cli::parse_from(["mandala", "ocean"]);
        assert_eq!(cli.word.as_deref(), Some("ocean"));
        assert!(!cli.is_interactive());
    }

    #[test]
    fn default_values() {
        let cli = Cli::parse_from(["mandala", "ocean"]);
        assert!(cli.api_key.is_none());
        assert!(cli.output.is_none());
        assert!(cli.output_dir.is_none());
        assert!(!cli.data_uri);
        assert!(!cli.interactive);
        assert!(cli.config.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn all_options() {
        let cli = Cli::parse_from([
            "mandala",
            "-k",
            "sk-test",
            "-o",
            "out.png",
            "-d",
            "art",
            "--data-uri",
            "--config",
            "/tmp/c.toml",
            "-v",
            "serenity",
        ]);
        assert_eq!(cli.api_key.as_deref(), Some("sk-test"));
        assert_eq!(cli.output.as_deref(), Some("out.png"));
        assert_eq!(cli.output_dir.as_deref(), Some("art"));
        assert!(cli.data_uri);
        assert_eq!(cli.config.as_deref(), Some("/tmp/c.toml"));
        assert!(cli.verbose);
        assert_eq!(cli.word.as_deref(), Some("serenity"));
    }

    #[test]
    fn no_word_is_interactive() {
        let cli = Cli::parse_from(["mandala"]);
        assert!(cli.is_interactive());
    }

    #[test]
    fn one_shot_flags_need_a_word() {
        let cli = Cli::parse_from(["mandala", "-o", "out.png"]);
        assert!(cli.check_mode().unwrap_err().contains("--output"));

        let cli = Cli::parse_from(["mandala", "--data-uri"]);
        assert!(cli.check_mode().unwrap_err().contains("--data-uri"));

        let cli = Cli::parse_from(["mandala", "-o", "out.png", "--data-uri", "ocean"]);
        assert!(cli.check_mode().is_ok());
    }

    #[test]
    fn one_shot_flags_conflict_with_interactive() {
        assert!(Cli::try_parse_from(["mandala", "-i", "-o", "out.png", "ocean"]).is_err());
        assert!(Cli::try_parse_from(["mandala", "-i", "--data-uri"]).is_err());
    }

    #[test]
    fn word_with_interactive_flag() {
        let cli = Cli::parse_from(["mandala", "-i", "cosmos"]);
        assert!(cli.is_interactive());
        assert_eq!(cli.word.as_deref(), Some("cosmos"));
    }
}
