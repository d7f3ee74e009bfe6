//! Layout commands: axis, organize.

use super::warn_if_unsaved;
use crate::cli::AxisArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use instaplot_board::Board;
use instaplot_domain::{AxisMode, BlobStore};
use std::path::Path;

/// Execute the axis command.
///
/// With no flags the current modes are shown. A change re-lays out the board
/// and is written back to the config file so later invocations use it.
pub fn execute_axis<S: BlobStore>(
    args: AxisArgs,
    board: &mut Board<S>,
    config: &mut Config,
    config_path: &Path,
    formatter: &Formatter,
) -> Result<()> {
    let x_axis = args.x.map(AxisMode::from).unwrap_or(board.x_axis());
    let y_axis = args.y.map(AxisMode::from).unwrap_or(board.y_axis());

    if board.set_axes(x_axis, y_axis) {
        warn_if_unsaved(board, formatter);
    }
    if config.set_axes(x_axis, y_axis) {
        config.save_to(config_path)?;
        tracing::debug!("Saved axes to {}", config_path.display());
    }

    println!("{}", formatter.axes(board.x_axis(), board.y_axis()));
    Ok(())
}

/// Execute the organize command.
pub fn execute_organize<S: BlobStore>(board: &mut Board<S>, formatter: &Formatter) -> Result<()> {
    board.organize();
    warn_if_unsaved(board, formatter);

    println!("{}", formatter.format_cards(board.cards(), None)?);
    Ok(())
}
