// native_surface/src/error.rs
//
//! Various errors that methods can produce.

/// Various errors that methods can produce.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Error {
    /// The device doesn't support the requested OpenGL API version.
    UnsupportedGLVersion,
    /// Choosing an OpenGL pixel format failed.
    PixelFormatSelectionFailed(WindowingApiError),
    /// The system couldn't choose an OpenGL pixel format.
    NoPixelFormatFound,
    /// The native display couldn't be opened.
    DeviceOpenFailed,
    /// The system couldn't create the rendering context.
    ///
    /// This is unrecoverable: the host should disable native rendering entirely.
    ContextCreationFailed(WindowingApiError),
    /// The system couldn't destroy the rendering context.
    ContextDestructionFailed(WindowingApiError),
    /// The system couldn't make the rendering context current or not current.
    MakeCurrentFailed(WindowingApiError),
    /// A surface is already bound; it must be detached before another one can be attached.
    SurfaceAlreadyBound,
    /// The operation requires a bound surface, but the binding is unbound.
    NoSurfaceBound,
    /// The host named a texture stream other than the one currently attached.
    UnexpectedStream,
    /// The native widget is invalid, or a presentable widget couldn't be derived from a stream.
    InvalidNativeWidget,
    /// The system couldn't create a surface for the drawable target.
    SurfaceCreationFailed(WindowingApiError),
    /// The system couldn't release the surface's native resources.
    SurfaceDestructionFailed(WindowingApiError),
    /// The system couldn't present a frame to the surface.
    PresentFailed(WindowingApiError),
}

/// Abstraction of the errors that the native windowing APIs return.
///
/// EGL is the only such API in use today, but recording devices report these too so that
/// failure paths can be exercised without a GPU.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum WindowingApiError {
    /// Miscellaneous error.
    Failed,
    /// EGL: An unrecognized attribute or attribute value was passed in the attribute list.
    BadAttribute,
    /// EGL: An EGLContext argument does not name a valid EGL rendering context.
    BadContext,
    /// EGL: An EGLDisplay argument does not name a valid EGL display connection.
    BadDisplay,
    /// EGL: Arguments are inconsistent (for example, a valid context requires
    /// buffers not supplied by a valid surface).
    BadMatch,
    /// EGL: EGL failed to allocate resources for the requested operation.
    BadAlloc,
    /// EGL: EGL is not initialized, or could not be initialized, for the
    /// specified EGL display connection.
    NotInitialized,
    /// EGL: EGL cannot access a requested resource (for example a context is
    /// bound in another thread).
    BadAccess,
    /// EGL: The current surface of the calling thread is a window, pixel
    /// buffer or pixmap that is no longer valid.
    BadCurrentSurface,
    /// EGL: An EGLSurface argument does not name a valid surface (window,
    /// pixel buffer or pixmap) configured for GL rendering.
    BadSurface,
    /// EGL: One or more argument values are invalid.
    BadParameter,
    /// EGL: A NativePixmapType argument does not refer to a valid native
    /// pixmap.
    BadNativePixmap,
    /// EGL: A NativeWindowType argument does not refer to a valid native
    /// window.
    BadNativeWindow,
    /// EGL: A power management event has occurred. The application must
    /// destroy all contexts and reinitialise OpenGL ES state and objects to
    /// continue rendering.
    ContextLost,
    /// EGL: The EGL configuration is unsupported.
    BadConfig,
}
