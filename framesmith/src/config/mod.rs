/// Run options and the JSON project file bundling them.
pub mod project;
