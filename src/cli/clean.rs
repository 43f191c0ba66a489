use std::path::Path;

use crate::{info, management::clean_output_dir, success, warning};

pub async fn clean(output_dir: &Path) {
    if !output_dir.is_dir() {
        warning!("Download folder {} does not exist.", output_dir.display());
        return;
    }

    info!("Cleaning up download folder {}...", output_dir.display());
    let report = clean_output_dir(output_dir).await;

    if report.failed > 0 {
        warning!("{} files could not be removed.", report.failed);
    }
    success!("Removed {} temporary files.", report.removed);
}
