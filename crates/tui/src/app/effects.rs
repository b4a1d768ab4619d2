use super::*;

impl App {
    /// Applies results posted by background tasks. Returns how many were
    /// received, including stale ones that were dropped.
    pub fn process_async_events(&mut self) -> usize {
        let mut async_events = Vec::new();
        if let Some(ref mut rx) = self.app_async_rx {
            while let Ok(event) = rx.try_recv() {
                async_events.push(event);
            }
        }

        let received = async_events.len();
        for event in async_events {
            match event {
                AppAsyncEvent::PredictionFinished {
                    generation,
                    file_name,
                    result,
                } => self.finish_prediction(generation, &file_name, result),
                AppAsyncEvent::ServiceChecked { result } => match result {
                    Ok(info) => {
                        tracing::info!("Classifier reachable: {}", info.message);
                        self.service_status = ServiceStatus::Online(info.message);
                    }
                    Err(e) => {
                        self.report_error("Classifier health check failed", &e);
                        self.service_status = ServiceStatus::Offline;
                    }
                },
            }
        }
        received
    }

    fn finish_prediction(
        &mut self,
        generation: u64,
        file_name: &str,
        result: Result<PredictionLabel, ApiError>,
    ) {
        if generation != self.generation || !self.workflow.is_submitting() {
            tracing::debug!(
                generation,
                current = self.generation,
                file = %file_name,
                "Discarding stale prediction result"
            );
            return;
        }

        match result {
            Ok(label) => {
                tracing::info!(file = %file_name, %label, "Prediction received");
                self.workflow = WorkflowState::Resolved(label);
                self.resolved_at = Some(Local::now());
            }
            Err(e) => {
                self.report_error(&format!("Upload of {file_name} failed"), &e);
                self.workflow = WorkflowState::Failed;
                self.show_notice(Notice::new(NoticeKind::UploadFailed, e.user_message()));
            }
        }
    }
}
