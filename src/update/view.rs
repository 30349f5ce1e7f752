//! Zoom and pan message handlers

use crate::commands::Cmd;
use crate::messages::ViewMsg;
use crate::model::AppModel;

pub fn update_view(model: &mut AppModel, msg: ViewMsg) -> Option<Cmd> {
    match msg {
        ViewMsg::ZoomIn => model.view.zoom_in().then_some(Cmd::Redraw),
        ViewMsg::ZoomOut => model.view.zoom_out().then_some(Cmd::Redraw),
        ViewMsg::Fit => model.fit_to_window().then_some(Cmd::Redraw),
        ViewMsg::StartPan(physical) => {
            model.view.start_pan(physical);
            None
        }
        ViewMsg::UpdatePan(physical) => model.view.update_pan(physical).then_some(Cmd::Redraw),
        ViewMsg::EndPan => {
            model.view.end_pan();
            None
        }
    }
}
