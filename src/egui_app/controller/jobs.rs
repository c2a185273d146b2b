use crate::analysis_api::{AnalysisClient, AnalyzeError, Finding};
use std::{
    panic::{self, AssertUnwindSafe},
    sync::mpsc::{Receiver, Sender},
    thread,
};

type TryRecvError = std::sync::mpsc::TryRecvError;

pub(crate) enum JobMessage {
    AnalysisFinished(AnalysisJobResult),
}

#[derive(Debug)]
pub(crate) struct AnalysisJob {
    pub(crate) request_id: u64,
    pub(crate) issue_text: String,
}

#[derive(Debug)]
pub(crate) struct AnalysisJobResult {
    pub(crate) request_id: u64,
    pub(crate) result: Result<Vec<Finding>, AnalyzeError>,
}

/// Owns the channel that background jobs report back on.
pub(crate) struct ControllerJobs {
    message_tx: Sender<JobMessage>,
    message_rx: Receiver<JobMessage>,
    pub(super) analysis_in_progress: bool,
    pub(super) pending_request_id: Option<u64>,
    next_request_id: u64,
}

impl ControllerJobs {
    pub(super) fn new() -> Self {
        let (message_tx, message_rx) = std::sync::mpsc::channel::<JobMessage>();
        Self {
            message_tx,
            message_rx,
            analysis_in_progress: false,
            pending_request_id: None,
            next_request_id: 1,
        }
    }

    pub(super) fn try_recv_message(&self) -> Result<JobMessage, TryRecvError> {
        self.message_rx.try_recv()
    }

    #[cfg(test)]
    pub(super) fn message_sender(&self) -> Sender<JobMessage> {
        self.message_tx.clone()
    }

    pub(super) fn analysis_in_progress(&self) -> bool {
        self.analysis_in_progress
    }

    pub(super) fn pending_request_id(&self) -> Option<u64> {
        self.pending_request_id
    }

    fn next_request_id(&mut self) -> u64 {
        let request_id = self.next_request_id;
        self.next_request_id = self.next_request_id.wrapping_add(1).max(1);
        request_id
    }

    /// Run one analysis request on a worker thread.
    ///
    /// Exactly one `AnalysisFinished` message is sent per call, even if the
    /// worker panics or cannot be spawned.
    pub(super) fn begin_analysis(&mut self, client: AnalysisClient, issue_text: String) -> Option<u64> {
        if self.analysis_in_progress {
            return None;
        }
        let job = AnalysisJob {
            request_id: self.next_request_id(),
            issue_text,
        };
        let request_id = job.request_id;
        self.analysis_in_progress = true;
        self.pending_request_id = Some(request_id);

        let tx = self.message_tx.clone();
        let spawned = thread::Builder::new()
            .name("nagar-analysis".into())
            .spawn(move || {
                let result = panic::catch_unwind(AssertUnwindSafe(|| {
                    client.analyze(&job.issue_text)
                }))
                .unwrap_or_else(|_| Err(AnalyzeError::Interrupted));
                let _ = tx.send(JobMessage::AnalysisFinished(AnalysisJobResult {
                    request_id: job.request_id,
                    result,
                }));
            });
        if let Err(err) = spawned {
            tracing::error!("Failed to spawn analysis worker: {err}");
            let _ = self
                .message_tx
                .send(JobMessage::AnalysisFinished(AnalysisJobResult {
                    request_id,
                    result: Err(AnalyzeError::Interrupted),
                }));
        }
        Some(request_id)
    }

    pub(super) fn clear_analysis(&mut self) {
        self.analysis_in_progress = false;
        self.pending_request_id = None;
    }
}
