use super::*;

pub struct App {
    pub config: Config,
    pub api: ClassifierApi,
    pub workflow: WorkflowState,
    pub selected_file: Option<SelectedFile>,
    /// Bumped on every selection and submission; a result is applied only
    /// while its tag still matches.
    pub generation: u64,
    pub notice: Option<Notice>,
    pub picker: Option<FilePicker>,
    pub show_help: bool,
    pub service_status: ServiceStatus,
    pub resolved_at: Option<DateTime<Local>>,
    pub layout: LayoutState,
    pub keybinds: Keybinds,
    pub app_async_tx: Option<mpsc::UnboundedSender<AppAsyncEvent>>,
    pub app_async_rx: Option<mpsc::UnboundedReceiver<AppAsyncEvent>>,
}

impl App {
    pub fn new(config: Config) -> ApiResult<Self> {
        let api = ClassifierApi::new(
            &config.classifier.endpoint,
            config.classifier.connect_timeout(),
        )?;
        let (app_async_tx, app_async_rx) = mpsc::unbounded_channel();

        Ok(Self {
            config,
            api,
            workflow: WorkflowState::Idle,
            selected_file: None,
            generation: 0,
            notice: None,
            picker: None,
            show_help: false,
            service_status: ServiceStatus::Unknown,
            resolved_at: None,
            layout: LayoutState::default(),
            keybinds: Keybinds,
            app_async_tx: Some(app_async_tx),
            app_async_rx: Some(app_async_rx),
        })
    }
}
