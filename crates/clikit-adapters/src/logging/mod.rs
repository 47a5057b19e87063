//! Log destination adapters implementing the `Logger` port.

mod composite;
mod console;
mod factory;
mod file;

pub use composite::CompositeLogger;
pub use console::ConsoleLogger;
pub use factory::{LoggerFactory, LoggerKind};
pub use file::{FileLogger, format_line};

#[cfg(test)]
pub(crate) mod test_support {
    use std::io::{self, Write};
    use std::sync::{Arc, Mutex};

    /// Cloneable in-memory writer.
    #[derive(Clone, Default)]
    pub struct SharedBuffer {
        bytes: Arc<Mutex<Vec<u8>>>,
        broken: bool,
    }

    impl SharedBuffer {
        pub fn broken() -> Self {
            Self {
                broken: true,
                ..Self::default()
            }
        }

        pub fn contents(&self) -> String {
            String::from_utf8(self.bytes.lock().unwrap().clone()).unwrap()
        }
    }

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.broken {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"));
            }
            self.bytes.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }
}
