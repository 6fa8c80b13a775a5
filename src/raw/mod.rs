mod arena;
mod handle;
mod node;
mod raw_llrb;

pub(crate) use handle::Handle;
pub(crate) use node::Link;
pub(crate) use raw_llrb::RawLlrb;
