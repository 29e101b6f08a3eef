//! SABnzbd post-processing script.

use fileaway_hook::{ClientVariant, run};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let exit_code = run(ClientVariant::Sabnzbd).await;
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}
