pub mod bootstrap;
pub mod command;
pub mod fs;
pub mod graph;
pub mod process;
pub mod signal;
pub mod work;

#[cfg(not(any(windows, target_arch = "wasm32")))]
use jemallocator::Jemalloc;

#[cfg(not(any(windows, target_arch = "wasm32")))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;
