/// Runtime message protocol between the popup and the content script

use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use crate::batch::{BatchTiming, batch_update};
use crate::extractor::extract;
use crate::issue_data::{BatchRequest, IssueRecord};
use crate::page::HostPage;
use crate::visibility::set_hidden_for_unselected;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum Request {
    GetSelectedData,
    #[serde(rename_all = "camelCase")]
    ToggleVisibility { show_only_selected: bool },
    BatchUpdate { key: String, value: String },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Response {
    Data {
        data: Vec<IssueRecord>,
    },
    Outcome {
        success: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        error: Option<String>,
    },
}

impl Response {
    pub fn ok() -> Response {
        Response::Outcome {
            success: true,
            error: None,
        }
    }

    pub fn failed(error: impl ToString) -> Response {
        Response::Outcome {
            success: false,
            error: Some(error.to_string()),
        }
    }
}

/// How the content script answers a request
pub enum Reply {
    /// Answer before the listener returns
    Immediate(Response),
    /// Answer later; the response channel must stay open
    Deferred(Pin<Box<dyn Future<Output = Response>>>),
}

pub fn route<P: HostPage + 'static>(page: P, request: Request) -> Reply {
    match request {
        Request::GetSelectedData => {
            let data = extract(&page);
            log::debug!("Extracted {} issue records", data.len());
            Reply::Immediate(Response::Data { data })
        }
        Request::ToggleVisibility { show_only_selected } => {
            set_hidden_for_unselected(&page, show_only_selected);
            Reply::Immediate(Response::ok())
        }
        Request::BatchUpdate { key, value } => {
            let request = BatchRequest { key, value };
            Reply::Deferred(Box::pin(async move {
                match batch_update(&page, &request, &BatchTiming::default()).await {
                    Ok(_) => Response::ok(),
                    Err(e) => {
                        log::error!("Batch update failed: {}", e);
                        Response::failed(e)
                    }
                }
            }))
        }
    }
}
