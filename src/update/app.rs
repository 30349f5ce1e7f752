//! App message handlers (file operations, clipboard, window events)

use std::path::PathBuf;

use crate::commands::Cmd;
use crate::messages::AppMsg;
use crate::mode::Mode;
use crate::model::AppModel;

const DEFAULT_PROJECT_NAME: &str = "matrix.json";

/// Handle app messages (file operations, window events)
pub fn update_app(model: &mut AppModel, msg: AppMsg) -> Option<Cmd> {
    match msg {
        AppMsg::Resize(width, height) => {
            model.resize(width, height);
            Some(Cmd::Redraw)
        }

        AppMsg::ScaleFactorChanged(scale) => {
            model.set_scale_factor(scale);
            Some(Cmd::Redraw)
        }

        AppMsg::OpenImage
        | AppMsg::ImportProject
        | AppMsg::ExportProject
        | AppMsg::OpenImageDialogResult { .. }
        | AppMsg::ImportDialogResult { .. }
            if model.ui.is_busy() =>
        {
            tracing::debug!("Ignoring file request while another is in progress");
            None
        }

        AppMsg::OpenImage => Some(Cmd::ShowOpenImageDialog),

        AppMsg::OpenImageDialogResult { path } => {
            let path = path?;
            model.ui.is_loading = true;
            model.ui.set_status(format!("Loading {}...", path.display()));
            Some(Cmd::LoadImage { path })
        }

        AppMsg::ImageLoaded { path, result } => {
            model.ui.is_loading = false;
            match result {
                Ok(image) => {
                    let (width, height) = (image.width, image.height);
                    model.document.set_image(image, Some(path.clone()));
                    model.fit_to_window();
                    model.ui.set_status(format!(
                        "Loaded {} ({} x {})",
                        file_name(&path),
                        width,
                        height
                    ));
                }
                Err(e) => {
                    tracing::warn!("Failed to load image {}: {}", path.display(), e);
                    model.ui.set_status(e.user_message());
                }
            }
            Some(Cmd::Redraw)
        }

        AppMsg::ExportProject => {
            if !model.document.is_defined() {
                model.ui.set_status("Draw a matrix before exporting");
                return Some(Cmd::Redraw);
            }
            Some(Cmd::ShowExportDialog {
                suggested: Some(suggested_project_path(model)),
            })
        }

        AppMsg::ExportDialogResult { path } => {
            let path = path?;
            let Some(project) = model.document.export() else {
                model.ui.set_status("Draw a matrix before exporting");
                return Some(Cmd::Redraw);
            };
            match project.to_json() {
                Ok(content) => {
                    model.ui.is_saving = true;
                    model.ui.set_status("Exporting...");
                    Some(Cmd::SaveProject { path, content })
                }
                Err(e) => {
                    model.ui.set_status(e.user_message());
                    Some(Cmd::Redraw)
                }
            }
        }

        AppMsg::ExportCompleted { path, result } => {
            model.ui.is_saving = false;
            match result {
                Ok(()) => {
                    tracing::info!("Exported project to {}", path.display());
                    model.ui.set_status(format!("Exported {}", file_name(&path)));
                    model.document.project_path = Some(path);
                }
                Err(e) => {
                    tracing::warn!("Failed to export {}: {}", path.display(), e);
                    model.ui.set_status(format!("Export failed: {}", e));
                }
            }
            Some(Cmd::Redraw)
        }

        AppMsg::ImportProject => Some(Cmd::ShowImportDialog),

        AppMsg::ImportDialogResult { path } => {
            let path = path?;
            model.ui.is_loading = true;
            model.ui.set_status(format!("Importing {}...", path.display()));
            Some(Cmd::LoadProject { path })
        }

        AppMsg::ProjectLoaded { path, result } => {
            model.ui.is_loading = false;
            let imported = result
                .map_err(|e| format!("Import failed: {}", e))
                .and_then(|content| {
                    model
                        .document
                        .import_json(&content)
                        .map_err(|e| e.user_message())
                });
            match imported {
                Ok(()) => {
                    if let Some(geometry) = model.document.store.geometry().copied() {
                        model.form.fill_from(&geometry);
                    }
                    model.mode.enter(Mode::Coordinate);
                    model.document.project_path = Some(path.clone());
                    model.fit_to_window();
                    model.ui.set_status(format!("Imported {}", file_name(&path)));
                }
                Err(message) => {
                    tracing::warn!("Failed to import {}: {}", path.display(), message);
                    model.ui.set_status(message);
                }
            }
            Some(Cmd::Redraw)
        }

        AppMsg::ClipboardResult { text, result } => {
            match result {
                Ok(()) => model.ui.confirm_copied(&text),
                Err(e) => tracing::warn!("Clipboard write failed: {}", e),
            }
            Some(Cmd::Redraw)
        }

        AppMsg::Quit => Some(Cmd::Quit),
    }
}

fn suggested_project_path(model: &AppModel) -> PathBuf {
    if let Some(path) = &model.document.project_path {
        return path.clone();
    }
    match &model.document.image_path {
        Some(image) => image.with_extension("json"),
        None => PathBuf::from(DEFAULT_PROJECT_NAME),
    }
}

fn file_name(path: &std::path::Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
