//! Argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use kgrag_core::config::{KgragConfig, ProviderKind, ResponseStyle, SynthesisModel};

#[derive(Parser, Debug)]
#[command(name = "kgrag")]
#[command(about = "Ask questions against a knowledge graph", long_about = None)]
#[command(version)]
pub struct Cli {
    /// TOML config file; compiled defaults apply when omitted
    #[arg(short, long, global = true, env = "KGRAG_CONFIG")]
    pub config: Option<PathBuf>,

    /// Use the offline hashing embedder and extractive answers
    #[arg(long, global = true)]
    pub offline: bool,

    /// Output as JSON (machine-readable)
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load a graph, embed it, and answer one or more questions
    Ask(AskArgs),

    /// Show a graph's nodes, relations, legend, and load problems
    Inspect {
        /// Graph JSON file
        #[arg(short, long)]
        graph: PathBuf,
    },
}

#[derive(Args, Debug)]
pub struct AskArgs {
    /// Graph JSON file
    #[arg(short, long)]
    pub graph: PathBuf,

    /// Questions, asked in order
    #[arg(required = true)]
    pub questions: Vec<String>,

    /// Number of seed nodes (1-10)
    #[arg(long)]
    pub top_k: Option<usize>,

    /// Traversal hops from the seeds (1-3)
    #[arg(long)]
    pub depth: Option<usize>,

    /// Answer style
    #[arg(long, value_enum)]
    pub style: Option<StyleArg>,

    /// Synthesis model
    #[arg(long, value_enum)]
    pub model: Option<ModelArg>,

    /// Skip the pauses between published phases
    #[arg(long)]
    pub no_pacing: bool,

    /// Print a summary of all answered queries at the end
    #[arg(long)]
    pub history: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum StyleArg {
    Concise,
    Detailed,
    Scientific,
}

impl From<StyleArg> for ResponseStyle {
    fn from(arg: StyleArg) -> Self {
        match arg {
            StyleArg::Concise => ResponseStyle::Concise,
            StyleArg::Detailed => ResponseStyle::Detailed,
            StyleArg::Scientific => ResponseStyle::Scientific,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum ModelArg {
    #[value(name = "gemini-2.5-flash")]
    Flash,
    #[value(name = "gemini-2.5-flash-thinking")]
    FlashThinking,
}

impl From<ModelArg> for SynthesisModel {
    fn from(arg: ModelArg) -> Self {
        match arg {
            ModelArg::Flash => SynthesisModel::GeminiFlash,
            ModelArg::FlashThinking => SynthesisModel::GeminiFlashThinking,
        }
    }
}

impl AskArgs {
    /// Fold the query flags into `config` and re-validate.
    pub fn apply(&self, config: &mut KgragConfig) -> anyhow::Result<()> {
        if let Some(top_k) = self.top_k {
            config.query.top_k = top_k;
        }
        if let Some(depth) = self.depth {
            config.query.graph_depth = depth;
        }
        if let Some(style) = self.style {
            config.query.response_style = style.into();
        }
        if let Some(model) = self.model {
            config.query.synthesis_model = model.into();
        }
        if self.no_pacing {
            config.pipeline.phase_pause_ms = 0;
        }
        config.validate()?;
        Ok(())
    }
}

impl Cli {
    /// Load the config file (if any) and apply global flags.
    pub fn load_config(&self) -> anyhow::Result<KgragConfig> {
        let mut config = match &self.config {
            Some(path) => KgragConfig::load(path)?,
            None => KgragConfig::default(),
        };
        if self.offline {
            config.provider.kind = ProviderKind::Hashing;
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn ask_flags_override_query_config() {
        let cli = Cli::parse_from([
            "kgrag",
            "--offline",
            "ask",
            "--graph",
            "g.json",
            "--top-k",
            "5",
            "--depth",
            "2",
            "--style",
            "scientific",
            "--model",
            "gemini-2.5-flash-thinking",
            "what is AI?",
        ]);
        let mut config = cli.load_config().unwrap();
        assert_eq!(config.provider.kind, ProviderKind::Hashing);

        let Commands::Ask(args) = &cli.command else {
            panic!("expected ask");
        };
        args.apply(&mut config).unwrap();
        assert_eq!(config.query.top_k, 5);
        assert_eq!(config.query.graph_depth, 2);
        assert_eq!(config.query.response_style, ResponseStyle::Scientific);
        assert_eq!(config.query.synthesis_model, SynthesisModel::GeminiFlashThinking);
        assert_eq!(args.questions, vec!["what is AI?".to_string()]);
    }

    #[test]
    fn out_of_range_flag_is_rejected() {
        let cli = Cli::parse_from(["kgrag", "ask", "-g", "g.json", "--depth", "9", "q"]);
        let Commands::Ask(args) = &cli.command else {
            panic!("expected ask");
        };
        let mut config = KgragConfig::default();
        assert!(args.apply(&mut config).is_err());
    }
}
