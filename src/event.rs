use crate::model::horizon::Horizon;
use crate::view_model::ViewModel;

#[derive(Debug, Clone)]
pub enum AppEvent {
    FetchStarted { horizon: Horizon },
    ViewModelReady(Box<ViewModel>),
    LogMessage(String),
}
