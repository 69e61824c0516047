/// Which text field receives typing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum Focus {
    #[default]
    UrlField,
    MessageInput,
}
