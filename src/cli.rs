use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "geo-timeline")]
#[command(about = "タイムラインと地図ビューポートの同期ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// レコードJSONを検証
    Validate {
        /// レコードJSONファイル
        #[arg(required = true)]
        input: PathBuf,
    },

    /// スクロールをシミュレートしてカメラ移動を確認
    Simulate {
        /// レコードJSONファイル
        #[arg(required = true)]
        input: PathBuf,

        /// タイムライン要素の高さ(px)
        #[arg(long)]
        item_height: Option<f64>,

        /// リストの表示高さ(px)
        #[arg(long)]
        viewport_height: Option<f64>,

        /// 1回あたりのスクロール量(px)
        #[arg(short, long)]
        step: Option<f64>,

        /// トレースをJSONで出力
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 設定を表示/編集
    Config {
        /// スクロール追従時のズームを設定
        #[arg(long)]
        set_fly_to_zoom: Option<u8>,

        /// ミニマップのズームを設定
        #[arg(long)]
        set_minimap_zoom: Option<u8>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
