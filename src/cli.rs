use clap::{Parser, Subcommand, ValueEnum};
use first_aid_common::SortKey;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "first-aid")]
#[command(about = "救急箱の在庫・使用期限管理ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// バックエンドURL（設定ファイル・環境変数より優先）
    #[arg(long, global = true)]
    pub base_url: Option<String>,
}

/// 表示の並べ替え指定（各一覧コマンド共通）
#[derive(clap::Args, Debug, Clone, Copy)]
pub struct SortArgs {
    /// 並べ替えキー
    #[arg(short, long, value_enum, default_value = "item-no")]
    pub sort: SortColumn,

    /// 降順
    #[arg(long)]
    pub desc: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// キットの品目一覧（カテゴリ別・期限ステータス付き）
    Kit {
        /// キットID（Kit Box Code）
        #[arg(required = true)]
        kit_id: String,

        #[command(flatten)]
        sort: SortArgs,
    },

    /// 全キット横断の品目一覧
    All {
        #[command(flatten)]
        sort: SortArgs,
    },

    /// 品目マスタの一覧
    Catalog {
        #[command(flatten)]
        sort: SortArgs,
    },

    /// キットに品目を追加（品目マスタにあれば品番・カテゴリを補完）
    Add {
        #[arg(required = true)]
        kit_id: String,

        /// 品名
        #[arg(short, long)]
        name: String,

        /// 使用期限 (YYYY-MM-DD)
        #[arg(short, long, default_value = "")]
        expiry: String,

        /// 数量
        #[arg(short, long, default_value = "1")]
        qty: String,
    },

    /// 数量を変更（0で "Empty"）
    SetQty {
        #[arg(required = true)]
        kit_id: String,

        #[arg(required = true)]
        item_id: String,

        /// 新しい数量（負の値は入力エラー）
        #[arg(required = true, allow_hyphen_values = true)]
        qty: String,
    },

    /// キットから品目を削除
    Remove {
        #[arg(required = true)]
        kit_id: String,

        #[arg(required = true)]
        item_id: String,

        /// 確認を省略
        #[arg(short, long)]
        yes: bool,
    },

    /// 品目マスタに追加
    CatalogAdd {
        /// 品番
        #[arg(long, default_value = "")]
        item_no: String,

        /// 品名
        #[arg(short, long)]
        name: String,

        /// カテゴリ
        #[arg(short, long)]
        category: String,

        /// 使用期限の管理対象か (Yes/No)
        #[arg(long, default_value = "Yes")]
        expiring: String,
    },

    /// 品目マスタから削除
    CatalogRemove {
        /// 品名
        #[arg(required = true)]
        name: String,

        /// 確認を省略
        #[arg(short, long)]
        yes: bool,
    },

    /// データファイルをダウンロードして日時付きで保存
    Snapshot {
        /// 保存先フォルダ（省略時は設定値）
        #[arg(short, long)]
        dir: Option<PathBuf>,
    },

    /// 設定を表示/編集
    Config {
        /// バックエンドURLを設定
        #[arg(long)]
        set_base_url: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

/// 並べ替え列
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum SortColumn {
    ItemNo,
    Name,
    ExpiryDate,
    Qty,
    KitId,
    Category,
    Expiring,
}

impl From<SortColumn> for SortKey {
    fn from(column: SortColumn) -> Self {
        match column {
            SortColumn::ItemNo => SortKey::ItemNo,
            SortColumn::Name => SortKey::Name,
            SortColumn::ExpiryDate => SortKey::ExpiryDate,
            SortColumn::Qty => SortKey::Qty,
            SortColumn::KitId => SortKey::KitId,
            SortColumn::Category => SortKey::Category,
            SortColumn::Expiring => SortKey::Expiring,
        }
    }
}

impl SortArgs {
    pub fn config(&self) -> first_aid_common::SortConfig {
        use first_aid_common::{SortConfig, SortOrder};

        let order = if self.desc { SortOrder::Desc } else { SortOrder::Asc };
        SortConfig::with_order(self.sort.into(), order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use first_aid_common::SortOrder;

    #[test]
    fn test_parse_kit_command() {
        let cli = Cli::parse_from(["first-aid", "kit", "A1", "--sort", "expiry-date", "--desc"]);
        match cli.command {
            Commands::Kit { kit_id, sort } => {
                assert_eq!(kit_id, "A1");
                let config = sort.config();
                assert_eq!(config.key, SortKey::ExpiryDate);
                assert_eq!(config.order, SortOrder::Desc);
            }
            _ => panic!("expected kit command"),
        }
    }

    #[test]
    fn test_default_sort() {
        let cli = Cli::parse_from(["first-aid", "all"]);
        match cli.command {
            Commands::All { sort } => {
                assert_eq!(sort.config(), first_aid_common::SortConfig::default());
            }
            _ => panic!("expected all command"),
        }
    }

    #[test]
    fn test_set_qty_accepts_zero() {
        let cli = Cli::parse_from(["first-aid", "set-qty", "A1", "id_1", "0"]);
        assert!(matches!(cli.command, Commands::SetQty { ref qty, .. } if qty == "0"));
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::parse_from(["first-aid", "catalog", "-v", "--base-url", "http://localhost:8000"]);
        assert!(cli.verbose);
        assert_eq!(cli.base_url.as_deref(), Some("http://localhost:8000"));
    }
}
