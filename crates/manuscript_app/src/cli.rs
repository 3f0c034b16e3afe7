use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "manuscript", version, about = "Build the manuscript blog's feed and page data")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Log at debug level.
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Also write the log to this file.
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Assemble every article and write `rss.xml` (and `articles.json`).
    Build(BuildArgs),
    /// Print the ids of all articles found in the articles directory.
    List(SourceArgs),
}

#[derive(Debug, Clone, Default, Args)]
pub struct SourceArgs {
    /// RON file overriding the built-in site settings.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory holding one subdirectory per article.
    #[arg(long)]
    pub articles_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Args)]
pub struct BuildArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Directory the artifacts are written to.
    #[arg(long)]
    pub public_dir: Option<PathBuf>,

    /// Skip writing `articles.json`.
    #[arg(long)]
    pub no_page_data: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn build_flags_parse() {
        let cli = Cli::try_parse_from([
            "manuscript",
            "--verbose",
            "build",
            "--config",
            "site.ron",
            "--public-dir",
            "out",
            "--no-page-data",
        ])
        .unwrap();

        assert!(cli.verbose);
        let Command::Build(args) = cli.command else {
            panic!("expected build");
        };
        assert_eq!(args.source.config, Some(PathBuf::from("site.ron")));
        assert_eq!(args.source.articles_dir, None);
        assert_eq!(args.public_dir, Some(PathBuf::from("out")));
        assert!(args.no_page_data);
    }

    #[test]
    fn list_accepts_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "manuscript",
            "list",
            "--articles-dir",
            "posts",
            "--log-file",
            "build.log",
        ])
        .unwrap();

        assert_eq!(cli.log_file, Some(PathBuf::from("build.log")));
        let Command::List(args) = cli.command else {
            panic!("expected list");
        };
        assert_eq!(args.articles_dir, Some(PathBuf::from("posts")));
    }
}
