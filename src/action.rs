/// Actions that can be performed in the application.
///
/// Key bindings and form buttons both resolve to one of these; `App::handle_action`
/// is the single place they are executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // Navigation
    Up,
    Down,
    Top,
    Bottom,
    NextPanel,

    // Image operations
    InspectImage,
    ShowCreateContainer,
    CreateContainer,
    ShowPullImage,
    PullImage,
    RemoveImage,
    RemoveDanglingImages,
    ShowSaveImage,
    SaveImage,
    ShowImportImage,
    ImportImage,
    ShowLoadImage,
    LoadImage,
    ShowSearchImage,
    SearchImage,

    // Container operations
    InspectContainer,
    RemoveContainer,

    // Views
    CloseDetail,
    ShowFilter,
    CloseForm,

    // App control
    Refresh,
    Quit,
}
