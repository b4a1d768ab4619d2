use super::*;

impl App {
    /// Replaces the selected file and forgets any previous result or error.
    pub fn select_file(&mut self, file: SelectedFile) {
        let accepted = &self.config.ui.accepted_extension;
        if !file.has_extension(accepted) {
            tracing::warn!(
                file = %file.name,
                expected = %accepted,
                "Selected file has an unexpected extension, it will be uploaded as is"
            );
        }
        tracing::info!(file = %file.name, bytes = file.len(), "File selected");

        self.generation = self.generation.wrapping_add(1);
        self.selected_file = Some(file);
        self.workflow = WorkflowState::FileChosen;
        self.resolved_at = None;
        self.notice = None;
    }

    pub fn select_path(&mut self, path: &Path) {
        match SelectedFile::from_path(path) {
            Ok(file) => self.select_file(file),
            Err(e) => {
                self.report_error(&format!("Failed to read {}", path.display()), &e);
                self.show_notice(Notice::new(
                    NoticeKind::FileUnreadable,
                    format!("Could not read {}: {}", path.display(), e),
                ));
            }
        }
    }

    /// Handles text dropped or pasted onto the drop zone.
    pub fn drop_text(&mut self, text: &str) {
        match normalize_dropped_path(text) {
            Some(path) => self.select_path(&path),
            None => tracing::debug!("Ignoring empty drop"),
        }
    }

    /// Uploads the selected file. Returns whether a request was issued.
    pub fn submit(&mut self) -> bool {
        if self.workflow.is_submitting() {
            return false;
        }

        let Some(file) = self.selected_file.clone() else {
            let kind = self.config.ui.accepted_extension.to_uppercase();
            self.show_notice(Notice::new(
                NoticeKind::NoFileSelected,
                format!("Please select a {kind} file first!"),
            ));
            return false;
        };

        self.generation = self.generation.wrapping_add(1);
        let generation = self.generation;
        self.workflow = WorkflowState::Submitting;
        self.resolved_at = None;

        tracing::info!(
            file = %file.name,
            endpoint = %self.api.endpoint(),
            generation,
            "Submitting file for prediction"
        );

        let api = self.api.clone();
        self.spawn_app_task(async move {
            let result = api.predict(&file).await;
            AppAsyncEvent::PredictionFinished {
                generation,
                file_name: file.name.clone(),
                result,
            }
        });
        true
    }

    pub fn check_service(&mut self) {
        self.service_status = ServiceStatus::Checking;
        let api = self.api.clone();
        self.spawn_app_task(async move {
            AppAsyncEvent::ServiceChecked {
                result: api.service_info().await,
            }
        });
    }

    pub fn open_picker(&mut self) -> Result<()> {
        let dir = match self
            .selected_file
            .as_ref()
            .and_then(|f| f.path.as_deref())
            .and_then(Path::parent)
        {
            Some(parent) if parent.is_dir() => parent.to_path_buf(),
            _ => std::env::current_dir()?,
        };
        self.picker = Some(FilePicker::open(dir, &self.config.ui.accepted_extension)?);
        Ok(())
    }

    pub(super) fn activate_picker(&mut self) -> Result<()> {
        let Some(picker) = self.picker.as_mut() else {
            return Ok(());
        };
        if let Some(path) = picker.activate()? {
            self.picker = None;
            self.select_path(&path);
        }
        Ok(())
    }

    pub fn show_notice(&mut self, notice: Notice) {
        self.notice = Some(notice);
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// Surfaces an error raised while handling input, such as a directory
    /// the picker cannot list.
    pub fn show_error_notice(&mut self, error: &anyhow::Error) {
        self.report_error("Input handling failed", error);
        self.show_notice(Notice::new(NoticeKind::ActionFailed, format!("{error:#}")));
    }
}
