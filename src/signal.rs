//! Unix signal handling (SIGINT).
//!
//! The first ctrl-c should reach the child build command, which dies and
//! lets us report the interruption; only a second ctrl-c kills the tool
//! itself.  A handler installed with SA_RESETHAND does exactly that: it
//! swallows one SIGINT in the parent (children revert to the default
//! disposition across exec) and then restores the default.

extern "C" fn sigint_noop(_sig: libc::c_int) {}

pub fn register_sigint() {
    // Safety: registering a signal handler is libc unsafe code.
    unsafe {
        let mut sa: libc::sigaction = std::mem::zeroed();
        sa.sa_sigaction = sigint_noop as usize as libc::sighandler_t;
        sa.sa_flags = libc::SA_RESETHAND;
        libc::sigaction(libc::SIGINT, &sa, std::ptr::null_mut());
    }
}
