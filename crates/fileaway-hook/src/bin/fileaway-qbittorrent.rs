//! qBittorrent "run external program on torrent finished" hook.
//!
//! Configure qBittorrent with:
//! `fileaway-qbittorrent "%N" "%L" "%G" "%F" "%R" "%D" "%C" "%Z" "%T" "%I" "%J" "%K"`

use fileaway_hook::{ClientVariant, run};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let exit_code = run(ClientVariant::QBittorrent).await;
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}
