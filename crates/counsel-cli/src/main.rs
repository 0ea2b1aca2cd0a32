use std::io::Write;
use std::time::Duration;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{bail, Result};
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use counsel_core::{
    AdvisoryRunner, Config, ContextBuilder, ExportWriter, OpenAIClient, SearchClient,
};

#[derive(Parser)]
#[command(name = "counsel")]
#[command(about = "Legal advisory AI panel over a single streamed completion", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search the web for material related to a legal question
    Search {
        /// The question to search for
        #[arg(required = true)]
        query: Vec<String>,
    },
    /// Ask the advisory panel for a full opinion
    Advise {
        /// The legal question to put to the panel
        #[arg(required = true)]
        query: Vec<String>,

        /// Write the full advisory to the export file after rendering
        #[arg(long)]
        export: bool,
    },
    /// Show the static legal reference links
    Links,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Search { query } => run_search(&config, &query.join(" ")).await,
        Commands::Advise { query, export } => run_advise(&config, &query.join(" "), export).await,
        Commands::Links => {
            print_links();
            Ok(())
        }
    }
}

async fn run_search(config: &Config, query: &str) -> Result<()> {
    if query.trim().is_empty() {
        bail!("검색할 내용을 입력해주세요.");
    }

    let client = match SearchClient::from_config(&config.search) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("경고: {e}");
            return Ok(());
        }
    };

    let spinner = search_spinner();
    let outcome = client.search(query).await;
    spinner.finish_and_clear();

    match outcome {
        Ok(results) => {
            println!("검색 결과");
            if results.is_empty() {
                println!("검색 결과가 없습니다.");
            }
            for result in &results {
                println!("제목: {}", result.title);
                println!("내용: {}", result.snippet);
                println!("URL: {}", result.url);
                println!("---");
            }
        }
        Err(e) => {
            // Inline warning only; the CLI stays usable for the next action.
            eprintln!("경고: 검색에 실패했습니다: {e}");
        }
    }

    Ok(())
}

async fn run_advise(config: &Config, query: &str, export: bool) -> Result<()> {
    if query.trim().is_empty() {
        bail!("문의 사항을 입력해주세요.");
    }

    let llm = OpenAIClient::from_config(&config.llm);
    let context_builder = ContextBuilder::new().with_max_results(config.search.max_results);
    let mut runner = AdvisoryRunner::new(llm).with_context_builder(context_builder);

    match SearchClient::from_config(&config.search) {
        Ok(search) => runner = runner.with_search(search),
        Err(e) => eprintln!("경고: 검색 없이 진행합니다: {e}"),
    }

    // Drain fragments onto stdout as they arrive.
    let (tx, mut rx) = mpsc::unbounded_channel::<counsel_core::StreamChunk>();
    let printer = tokio::spawn(async move {
        let mut stdout = std::io::stdout();
        while let Some(chunk) = rx.recv().await {
            if chunk.is_final {
                break;
            }
            let _ = write!(stdout, "{}", chunk.text);
            let _ = stdout.flush();
        }
    });

    let outcome = runner.advise(query, tx).await;
    let _ = printer.await;

    let advisory = match outcome {
        Ok(advisory) => advisory,
        Err(e) => {
            // The partial accumulation is discarded; nothing is partitioned.
            eprintln!("\n오류: 자문 생성에 실패했습니다: {e}");
            return Ok(());
        }
    };

    println!("\n");
    for section in &advisory.sections {
        println!("## {}", section.role);
        println!("{}\n", section.text);
    }

    if export {
        let writer = ExportWriter::with_path(&config.export.file);
        let exported = writer.export(&advisory.full_text)?;
        println!("저장됨: {}", exported.path.display());
        println!("다운로드 인코딩: {} bytes", exported.encoded.len());
    }

    Ok(())
}

fn search_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}").unwrap_or(ProgressStyle::default_spinner()),
    );
    spinner.set_message("인터넷에서 관련 정보를 검색 중입니다...");
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

fn print_links() {
    println!("추가 정보");
    println!(
        "국가법령정보센터: https://www.law.go.kr/LSW/lsInfoP.do?efYd=20230101&lsiSeq=246753#0000"
    );
    println!("대법원 종합법률정보: https://glaw.scourt.go.kr/wsjo/intesrch/sjo022.do");
}
