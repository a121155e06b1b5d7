use clap::Parser;
use geo_timeline::{cli, config, error, records, simulate};
use cli::{Cli, Commands};
use config::{Config, FLY_TO_ZOOM_ENV};
use error::Result;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Validate { input } => {
            println!("🗺  geo-timeline - レコード検証\n");

            let timeline = records::load_timeline(&input)?;
            println!("✔ {}件のレコードを読み込み", timeline.len());

            let report = records::check_chronology(&timeline);
            if !report.unparsed.is_empty() {
                println!("- 日付を解釈できないレコード: {:?}", report.unparsed);
            }
            if report.is_ordered() {
                println!("✔ 日付は時系列順です");
            } else {
                for issue in &report.issues {
                    println!(
                        "⚠ #{}: {} が直前の {} より前です",
                        issue.index, issue.current, issue.previous
                    );
                }
            }

            println!("\n✅ 検証完了");
        }

        Commands::Simulate { input, item_height, viewport_height, step, output } => {
            println!("🧭 geo-timeline - スクロールシミュレーション\n");

            // 設定は実行するコマンドでだけ読む
            let mut config = Config::load()?.effective()?;
            if let Some(h) = item_height {
                config.item_height = h;
            }
            if let Some(h) = viewport_height {
                config.viewport_height = h;
            }
            if let Some(s) = step {
                config.scroll_step = s;
            }

            let timeline = records::load_timeline(&input)?;
            let trace = simulate::run_simulation(timeline, &config)?;

            println!(
                "✔ {}件 / スクロールイベント {}回 / アクティブ変化 {}回\n",
                trace.records,
                trace.scroll_events,
                trace.steps.len()
            );
            for s in &trace.steps {
                println!(
                    "  scroll {:>7.1}px  #{} → #{}  {}  flyTo({}) z{}",
                    s.scroll, s.previous, s.active, s.name, s.target, s.zoom
                );
            }

            if let Some(output) = output {
                let json = serde_json::to_string_pretty(&trace)?;
                std::fs::write(&output, json)?;
                println!("\n✔ トレースを保存: {}", output.display());
            }

            println!("\n✅ 完了（最終アクティブ: #{}）", trace.final_active);
        }

        Commands::Config { set_fly_to_zoom, set_minimap_zoom, show } => {
            // 保存するのはファイルの内容（環境変数は反映しない）
            let path = Config::config_path()?;
            let mut config = Config::load_from(&path)?;
            let changed = set_fly_to_zoom.is_some() || set_minimap_zoom.is_some();

            if let Some(zoom) = set_fly_to_zoom {
                config.sync.fly_to_zoom = zoom;
            }
            if let Some(zoom) = set_minimap_zoom {
                config.sync.minimap_zoom = zoom;
            }
            if changed {
                config.save_to(&path)?;
                println!("✔ 設定を保存しました");
            }

            if show {
                println!("設定:");
                println!("  追従ズーム: {}", config.sync.fly_to_zoom);
                println!("  ミニマップズーム: {}", config.sync.minimap_zoom);
                println!("  初期表示: ({}) z{}", config.sync.initial_center, config.sync.initial_zoom);
                println!("  ズーム範囲: {}..={}", config.sync.min_zoom, config.sync.max_zoom);
                println!("  タイルURL: {}", config.sync.tile_url);
                println!("  要素の高さ: {}px", config.item_height);
                println!("  表示高さ: {}px", config.viewport_height);
                if let Ok(value) = std::env::var(FLY_TO_ZOOM_ENV) {
                    println!("  ({} = {} が追従ズームより優先されます)", FLY_TO_ZOOM_ENV, value);
                }
            }
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
