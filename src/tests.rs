// native_surface/src/tests.rs
//
//! Unit tests.

use crate::adapter::{FramePacing, StreamIdentityPolicy, StreamOptions};
use crate::device::Device as DeviceInterface;
use crate::platform::recording::{Device, FailurePoint, NativeCall, NativeStream, NativeWidget};
use crate::{BindingState, ContextAttributeFlags, ContextAttributes, DirectSurfaceAdapter, Error};
use crate::{GLApi, GLVersion, RenderingContext, StreamID, StreamSurfaceAdapter, SurfaceBinding};
use crate::{SurfaceID, SurfaceTarget, WindowingApiError};

use euclid::default::Size2D;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

static GL_VERSIONS: [GLVersion; 5] = [
    GLVersion { major: 2, minor: 0 },
    GLVersion { major: 2, minor: 1 },
    GLVersion { major: 3, minor: 0 },
    GLVersion { major: 3, minor: 3 },
    GLVersion { major: 4, minor: 1 },
];

static GL_ES_VERSIONS: [GLVersion; 4] = [
    GLVersion { major: 2, minor: 0 },
    GLVersion { major: 2, minor: 1 },
    GLVersion { major: 3, minor: 0 },
    GLVersion { major: 3, minor: 1 },
];

fn size(width: i32, height: i32) -> Size2D<i32> {
    Size2D::new(width, height)
}

fn create_context() -> RenderingContext<Device> {
    let context = RenderingContext::new(Device::new(), &ContextAttributes::default()).unwrap();
    assert_eq!(context.device().take_calls(), vec![NativeCall::CreateContext]);
    context
}

fn widget(id: u64) -> SurfaceTarget<NativeWidget, NativeStream> {
    SurfaceTarget::Direct { native_widget: NativeWidget::new(id, size(640, 480)) }
}

// Tests that all combinations of flags and supported versions result in valid contexts.
#[test]
fn test_context_creation() {
    for &gl_api in &[GLApi::GL, GLApi::GLES] {
        let versions = match gl_api {
            GLApi::GL => &GL_VERSIONS[..],
            GLApi::GLES => &GL_ES_VERSIONS[..],
        };

        for &version in versions {
            for flag_bits in 0..(ContextAttributeFlags::all().bits() + 1) {
                let flags = ContextAttributeFlags::from_bits_truncate(flag_bits);
                let attributes = ContextAttributes { version, flags };
                let context =
                    RenderingContext::new(Device::with_gl_api(gl_api), &attributes).unwrap();
                assert_eq!(context.device().gl_api(), gl_api);
                assert_eq!(context.attributes(), attributes);
                assert_eq!(context.native_context().attributes(), attributes);
                assert_eq!(context.bound_surface_count(), 0);
            }
        }
    }
}

#[test]
fn test_unsupported_gl_version() {
    let unsupported = [
        (GLApi::GL, GLVersion::new(1, 5)),
        (GLApi::GLES, GLVersion::new(1, 1)),
        (GLApi::GLES, GLVersion::new(4, 1)),
    ];
    for &(gl_api, version) in &unsupported {
        let attributes = ContextAttributes { version, flags: ContextAttributeFlags::ALPHA };
        match RenderingContext::new(Device::with_gl_api(gl_api), &attributes) {
            Err(Error::UnsupportedGLVersion) => {}
            other => panic!("unexpected result for {:?} {:?}: {:?}", gl_api, version, other),
        }
    }
}

#[test]
fn test_context_ids_are_unique() {
    let first = create_context();
    let second = create_context();
    assert!(second.id().0 > first.id().0);
}

#[test]
fn test_context_creation_failure() {
    let device = Device::new();
    device.fail_next(FailurePoint::CreateContext);
    match RenderingContext::new(device, &ContextAttributes::default()) {
        Err(Error::ContextCreationFailed(WindowingApiError::NotInitialized)) => {}
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn test_context_released_on_drop() {
    let context = create_context();
    let log = context.device().call_log();
    {
        let mut binding = SurfaceBinding::new(&context);
        binding.attach(widget(1)).unwrap();
        binding.detach().unwrap();
    }
    drop(context);
    assert_eq!(log.calls().last(), Some(&NativeCall::DestroyContext));
}

#[test]
fn test_context_explicit_destroy() {
    let context = create_context();
    let log = context.device().call_log();
    context.destroy().unwrap();
    assert_eq!(log.take(), vec![NativeCall::DestroyContext]);

    // A failed destroy is reported, and the context is not released a second time on drop.
    let context = create_context();
    let log = context.device().call_log();
    context.device().fail_next(FailurePoint::DestroyContext);
    assert_eq!(context.destroy(),
               Err(Error::ContextDestructionFailed(WindowingApiError::BadContext)));
    assert_eq!(log.calls(), vec![NativeCall::DestroyContext]);
}

#[test]
fn test_context_drop_failure_is_logged_only() {
    let context = create_context();
    let log = context.device().call_log();
    context.device().fail_next(FailurePoint::DestroyContext);
    drop(context);
    assert_eq!(log.calls(), vec![NativeCall::DestroyContext]);
}

#[test]
fn test_binding_starts_unbound() {
    let context = create_context();
    let binding = SurfaceBinding::new(&context);
    assert_eq!(binding.state(), BindingState::Unbound);
    assert!(!binding.is_bound());
    assert_eq!(binding.surface_info(), None);
    assert_eq!(binding.frames_presented(), 0);
    assert!(context.device().calls().is_empty());
}

#[test]
fn test_attach_redraw_detach() {
    let context = create_context();
    let mut binding = SurfaceBinding::new(&context);

    binding.attach(widget(5)).unwrap();
    assert_eq!(binding.state(), BindingState::Bound);
    let info = binding.surface_info().unwrap();
    assert_eq!(info.id, SurfaceID(0));
    assert_eq!(info.size, size(640, 480));
    assert_eq!(context.bound_surface_count(), 1);

    binding.redraw().unwrap();
    binding.detach().unwrap();
    assert_eq!(binding.state(), BindingState::Unbound);
    assert_eq!(binding.surface_info(), None);
    assert_eq!(context.bound_surface_count(), 0);
    assert_eq!(context.device().live_surfaces(), 0);

    assert_eq!(context.device().calls(), vec![
        NativeCall::CreateSurface { surface: SurfaceID(0), widget: 5 },
        NativeCall::PresentSurface { surface: SurfaceID(0) },
        NativeCall::DestroySurface { surface: SurfaceID(0) },
    ]);
}

#[test]
fn test_attach_while_bound_is_rejected() {
    let context = create_context();
    let mut binding = SurfaceBinding::new(&context);
    binding.attach(widget(1)).unwrap();
    context.device().take_calls();

    assert_eq!(binding.attach(widget(2)), Err(Error::SurfaceAlreadyBound));
    let stream = NativeStream::new(3, size(16, 16));
    assert_eq!(binding.attach(SurfaceTarget::Stream { native_stream: stream }),
               Err(Error::SurfaceAlreadyBound));

    // The original surface is untouched.
    assert!(context.device().calls().is_empty());
    assert_eq!(binding.surface_info().unwrap().id, SurfaceID(0));
    assert_eq!(context.device().live_surfaces(), 1);
    assert_eq!(context.bound_surface_count(), 1);
}

#[test]
fn test_redraw_while_unbound_makes_no_native_call() {
    let context = create_context();
    let mut binding = SurfaceBinding::new(&context);
    assert_eq!(binding.redraw(), Err(Error::NoSurfaceBound));
    assert!(context.device().calls().is_empty());

    binding.attach(widget(1)).unwrap();
    binding.detach().unwrap();
    context.device().take_calls();
    assert_eq!(binding.redraw(), Err(Error::NoSurfaceBound));
    assert!(context.device().calls().is_empty());
}

#[test]
fn test_double_detach_is_rejected() {
    let context = create_context();
    let mut binding = SurfaceBinding::new(&context);
    assert_eq!(binding.detach(), Err(Error::NoSurfaceBound));

    binding.attach(widget(1)).unwrap();
    binding.detach().unwrap();
    assert_eq!(binding.detach(), Err(Error::NoSurfaceBound));
    assert_eq!(context.device().calls().iter().filter(|call| {
        matches!(call, NativeCall::DestroySurface { .. })
    }).count(), 1);
}

#[test]
fn test_repeated_redraw_leaves_state_unchanged() {
    let context = create_context();
    let mut binding = SurfaceBinding::new(&context);
    binding.attach(widget(1)).unwrap();
    let info = binding.surface_info();
    context.device().take_calls();

    for _ in 0..7 {
        binding.redraw().unwrap();
    }

    assert_eq!(binding.state(), BindingState::Bound);
    assert_eq!(binding.surface_info(), info);
    assert_eq!(binding.frames_presented(), 7);
    assert_eq!(context.device().calls(),
               vec![NativeCall::PresentSurface { surface: SurfaceID(0) }; 7]);
}

#[test]
fn test_binding_is_reusable_across_cycles() {
    let context = create_context();
    let mut binding = SurfaceBinding::new(&context);
    for cycle in 0..3 {
        binding.attach(widget(cycle)).unwrap();
        binding.redraw().unwrap();
        assert_eq!(binding.frames_presented(), 1);
        assert_eq!(binding.surface_info().unwrap().id, SurfaceID(cycle as usize));
        binding.detach().unwrap();
        assert_eq!(binding.frames_presented(), 0);
    }
    assert_eq!(context.device().live_surfaces(), 0);
}

#[test]
fn test_stream_target_derives_its_own_widget() {
    let context = create_context();
    let mut binding = SurfaceBinding::new(&context);
    let stream = NativeStream::new(9, size(320, 200));
    binding.attach(SurfaceTarget::Stream { native_stream: stream }).unwrap();
    assert_eq!(binding.surface_info().unwrap().size, size(320, 200));
    assert_eq!(context.device().calls(), vec![
        NativeCall::CreateWidgetFromStream { stream: 9 },
        NativeCall::CreateSurface { surface: SurfaceID(0), widget: 9 },
    ]);
}

#[test]
fn test_surface_creation_failure_leaves_binding_unbound() {
    let context = create_context();
    let mut binding = SurfaceBinding::new(&context);
    context.device().fail_next(FailurePoint::CreateSurface);

    assert_eq!(binding.attach(widget(1)),
               Err(Error::SurfaceCreationFailed(WindowingApiError::BadNativeWindow)));
    assert_eq!(binding.state(), BindingState::Unbound);
    assert_eq!(context.bound_surface_count(), 0);
    assert_eq!(context.device().live_surfaces(), 0);

    // The host may retry.
    binding.attach(widget(1)).unwrap();
    assert_eq!(binding.surface_info().unwrap().id, SurfaceID(1));
}

#[test]
fn test_present_failure_keeps_binding_bound() {
    let context = create_context();
    let mut binding = SurfaceBinding::new(&context);
    binding.attach(widget(1)).unwrap();
    context.device().fail_next(FailurePoint::PresentSurface);

    assert_eq!(binding.redraw(), Err(Error::PresentFailed(WindowingApiError::BadSurface)));
    assert_eq!(binding.state(), BindingState::Bound);
    assert_eq!(binding.frames_presented(), 0);
    binding.redraw().unwrap();
    assert_eq!(binding.frames_presented(), 1);
}

#[test]
fn test_destroy_failure_still_unbinds() {
    let context = create_context();
    let mut binding = SurfaceBinding::new(&context);
    binding.attach(widget(1)).unwrap();
    context.device().fail_next(FailurePoint::DestroySurface);

    assert_eq!(binding.detach(),
               Err(Error::SurfaceDestructionFailed(WindowingApiError::BadSurface)));
    assert_eq!(binding.state(), BindingState::Unbound);
    assert_eq!(context.bound_surface_count(), 0);
    assert_eq!(binding.detach(), Err(Error::NoSurfaceBound));
}

#[test]
fn test_dropping_bound_binding_releases_surface() {
    let context = create_context();
    {
        let mut binding = SurfaceBinding::new(&context);
        binding.attach(widget(1)).unwrap();
        assert_eq!(context.device().live_surfaces(), 1);
    }
    assert_eq!(context.device().live_surfaces(), 0);
    assert_eq!(context.bound_surface_count(), 0);
    assert_eq!(context.device().calls().last(),
               Some(&NativeCall::DestroySurface { surface: SurfaceID(0) }));
}

#[test]
fn test_bindings_share_one_context() {
    let context = create_context();
    let mut direct = DirectSurfaceAdapter::new(&context);
    let mut stream = StreamSurfaceAdapter::new(&context);

    direct.surface_created(NativeWidget::new(1, size(10, 10))).unwrap();
    stream.stream_available(NativeStream::new(2, size(20, 20)), size(20, 20)).unwrap();
    assert_eq!(context.bound_surface_count(), 2);
    assert_eq!(direct.binding().context().id(), stream.binding().context().id());

    let direct_id = direct.binding().surface_info().unwrap().id;
    let stream_id = stream.binding().surface_info().unwrap().id;
    assert_ne!(direct_id, stream_id);

    direct.surface_destroyed().unwrap();
    assert_eq!(context.bound_surface_count(), 1);
    assert_eq!(stream.state(), BindingState::Bound);
}

// created(T1), resized(T1, 100, 100), destroyed(T1)
#[test]
fn test_direct_surface_lifecycle() {
    let context = create_context();
    let mut adapter = DirectSurfaceAdapter::new(&context);

    adapter.surface_created(NativeWidget::new(1, size(100, 100))).unwrap();
    adapter.surface_changed(size(100, 100)).unwrap();
    assert_eq!(adapter.size(), Some(size(100, 100)));
    adapter.surface_destroyed().unwrap();

    assert_eq!(adapter.state(), BindingState::Unbound);
    assert_eq!(adapter.size(), None);
    assert_eq!(context.device().calls(), vec![
        NativeCall::CreateSurface { surface: SurfaceID(0), widget: 1 },
        NativeCall::PresentSurface { surface: SurfaceID(0) },
        NativeCall::DestroySurface { surface: SurfaceID(0) },
    ]);
}

#[test]
fn test_direct_surface_out_of_order_events() {
    let context = create_context();
    let mut adapter = DirectSurfaceAdapter::new(&context);

    assert_eq!(adapter.surface_changed(size(100, 100)), Err(Error::NoSurfaceBound));
    assert_eq!(adapter.size(), None);
    assert_eq!(adapter.surface_destroyed(), Err(Error::NoSurfaceBound));

    adapter.surface_created(NativeWidget::new(1, size(100, 100))).unwrap();
    assert_eq!(adapter.surface_created(NativeWidget::new(2, size(100, 100))),
               Err(Error::SurfaceAlreadyBound));
    assert_eq!(context.device().calls(), vec![
        NativeCall::CreateSurface { surface: SurfaceID(0), widget: 1 },
    ]);
}

// available(S1)
#[test]
fn test_stream_available_forces_first_frame() {
    let context = create_context();
    let mut adapter = StreamSurfaceAdapter::new(&context);

    adapter.stream_available(NativeStream::new(1, size(64, 64)), size(64, 64)).unwrap();

    assert_eq!(adapter.state(), BindingState::Bound);
    assert_eq!(adapter.stream_id(), Some(StreamID(1)));
    assert_eq!(adapter.size(), Some(size(64, 64)));
    assert_eq!(adapter.binding().frames_presented(), 1);
    assert_eq!(context.device().calls(), vec![
        NativeCall::CreateWidgetFromStream { stream: 1 },
        NativeCall::CreateSurface { surface: SurfaceID(0), widget: 1 },
        NativeCall::PresentSurface { surface: SurfaceID(0) },
    ]);
}

// available(S1), destroyed(S1), available(S1)
#[test]
fn test_stream_reattach_after_destroy() {
    let context = create_context();
    let mut adapter = StreamSurfaceAdapter::new(&context);
    let stream = NativeStream::new(1, size(64, 64));

    adapter.stream_available(stream, size(64, 64)).unwrap();
    assert_eq!(adapter.stream_destroyed(&stream), Ok(true));
    assert_eq!(adapter.state(), BindingState::Unbound);
    assert_eq!(adapter.stream_id(), None);
    context.device().take_calls();

    adapter.stream_available(stream, size(64, 64)).unwrap();
    assert_eq!(adapter.state(), BindingState::Bound);
    assert_eq!(context.device().calls(), vec![
        NativeCall::CreateWidgetFromStream { stream: 1 },
        NativeCall::CreateSurface { surface: SurfaceID(1), widget: 1 },
        NativeCall::PresentSurface { surface: SurfaceID(1) },
    ]);
}

#[test]
fn test_stream_resize_redraws() {
    let context = create_context();
    let mut adapter = StreamSurfaceAdapter::new(&context);
    let stream = NativeStream::new(4, size(64, 64));
    adapter.stream_available(stream, size(64, 64)).unwrap();
    context.device().take_calls();

    adapter.stream_size_changed(stream, size(128, 32)).unwrap();
    assert_eq!(adapter.size(), Some(size(128, 32)));
    assert_eq!(adapter.binding().frames_presented(), 2);
    assert_eq!(context.device().calls(),
               vec![NativeCall::PresentSurface { surface: SurfaceID(0) }]);
}

#[test]
fn test_stream_events_while_unbound() {
    let context = create_context();
    let mut adapter = StreamSurfaceAdapter::new(&context);
    let stream = NativeStream::new(1, size(8, 8));

    assert_eq!(adapter.stream_size_changed(stream, size(8, 8)), Err(Error::NoSurfaceBound));
    assert_eq!(adapter.stream_destroyed(&stream), Err(Error::NoSurfaceBound));
    assert_eq!(adapter.stream_updated(&stream, 1_000), Err(Error::NoSurfaceBound));
    assert_eq!(adapter.pacing().frames(), 0);
    assert!(context.device().calls().is_empty());
}

#[test]
fn test_stream_widget_derivation_failure() {
    let context = create_context();
    let mut adapter = StreamSurfaceAdapter::new(&context);
    context.device().fail_next(FailurePoint::CreateWidgetFromStream);

    let stream = NativeStream::new(1, size(8, 8));
    assert_eq!(adapter.stream_available(stream, size(8, 8)), Err(Error::InvalidNativeWidget));
    assert_eq!(adapter.state(), BindingState::Unbound);
    assert_eq!(adapter.stream_id(), None);
    assert_eq!(context.device().calls(),
               vec![NativeCall::CreateWidgetFromStream { stream: 1 }]);
}

#[test]
fn test_stream_first_frame_failure_stays_bound() {
    let context = create_context();
    let mut adapter = StreamSurfaceAdapter::new(&context);
    context.device().fail_next(FailurePoint::PresentSurface);

    let stream = NativeStream::new(1, size(8, 8));
    assert_eq!(adapter.stream_available(stream, size(8, 8)),
               Err(Error::PresentFailed(WindowingApiError::BadSurface)));
    assert_eq!(adapter.state(), BindingState::Bound);
    assert_eq!(adapter.stream_destroyed(&stream), Ok(true));
    assert_eq!(context.device().live_surfaces(), 0);
}

#[test]
fn test_stream_identity_reject() {
    let context = create_context();
    let mut adapter = StreamSurfaceAdapter::new(&context);
    assert_eq!(adapter.options().identity, StreamIdentityPolicy::Reject);

    let first = NativeStream::new(1, size(8, 8));
    let second = NativeStream::new(2, size(8, 8));
    adapter.stream_available(first, size(8, 8)).unwrap();
    context.device().take_calls();

    assert_eq!(adapter.stream_size_changed(second, size(16, 16)), Err(Error::UnexpectedStream));
    assert_eq!(adapter.stream_destroyed(&second), Err(Error::UnexpectedStream));
    assert_eq!(adapter.state(), BindingState::Bound);
    assert_eq!(adapter.stream_id(), Some(StreamID(1)));
    assert_eq!(adapter.size(), Some(size(8, 8)));
    assert!(context.device().calls().is_empty());

    assert_eq!(adapter.stream_destroyed(&first), Ok(true));
}

#[test]
fn test_stream_identity_rebind() {
    let context = create_context();
    let options = StreamOptions { identity: StreamIdentityPolicy::Rebind };
    let mut adapter = StreamSurfaceAdapter::with_options(&context, options);

    let first = NativeStream::new(1, size(8, 8));
    let second = NativeStream::new(2, size(16, 16));
    adapter.stream_available(first, size(8, 8)).unwrap();
    adapter.stream_updated(&first, 100).unwrap();
    context.device().take_calls();

    adapter.stream_size_changed(second, size(16, 16)).unwrap();
    assert_eq!(adapter.stream_id(), Some(StreamID(2)));
    assert_eq!(adapter.size(), Some(size(16, 16)));
    assert_eq!(adapter.pacing().frames(), 0);
    assert_eq!(context.device().calls(), vec![
        NativeCall::DestroySurface { surface: SurfaceID(0) },
        NativeCall::CreateWidgetFromStream { stream: 2 },
        NativeCall::CreateSurface { surface: SurfaceID(1), widget: 2 },
        NativeCall::PresentSurface { surface: SurfaceID(1) },
    ]);

    // A destroy naming yet another stream still tears the binding down.
    let third = NativeStream::new(3, size(16, 16));
    assert_eq!(adapter.stream_destroyed(&third), Ok(true));
    assert_eq!(adapter.state(), BindingState::Unbound);
    assert_eq!(context.device().live_surfaces(), 0);
}

#[test]
fn test_stream_destroy_failure_is_still_acknowledged() {
    let context = create_context();
    let mut adapter = StreamSurfaceAdapter::new(&context);
    let stream = NativeStream::new(1, size(8, 8));
    adapter.stream_available(stream, size(8, 8)).unwrap();
    context.device().fail_next(FailurePoint::DestroySurface);

    assert_eq!(adapter.stream_destroyed(&stream), Ok(true));
    assert_eq!(adapter.state(), BindingState::Unbound);
    assert_eq!(adapter.stream_id(), None);
    assert_eq!(context.device().live_surfaces(), 0);
    assert_eq!(context.bound_surface_count(), 0);

    // The stream is gone; a repeated destroy is out of order.
    assert_eq!(adapter.stream_destroyed(&stream), Err(Error::NoSurfaceBound));
}

#[test]
fn test_stream_rebind_survives_destroy_failure() {
    let context = create_context();
    let options = StreamOptions { identity: StreamIdentityPolicy::Rebind };
    let mut adapter = StreamSurfaceAdapter::with_options(&context, options);
    adapter.stream_available(NativeStream::new(1, size(8, 8)), size(8, 8)).unwrap();
    context.device().take_calls();
    context.device().fail_next(FailurePoint::DestroySurface);

    adapter.stream_size_changed(NativeStream::new(2, size(16, 16)), size(16, 16)).unwrap();
    assert_eq!(adapter.state(), BindingState::Bound);
    assert_eq!(adapter.stream_id(), Some(StreamID(2)));
    assert_eq!(context.device().live_surfaces(), 1);
    assert_eq!(context.bound_surface_count(), 1);
    assert_eq!(context.device().calls(), vec![
        NativeCall::DestroySurface { surface: SurfaceID(0) },
        NativeCall::CreateWidgetFromStream { stream: 2 },
        NativeCall::CreateSurface { surface: SurfaceID(1), widget: 2 },
        NativeCall::PresentSurface { surface: SurfaceID(1) },
    ]);
}

#[test]
fn test_stream_updates_from_another_stream() {
    let first = NativeStream::new(1, size(8, 8));
    let second = NativeStream::new(2, size(8, 8));

    let context = create_context();
    let mut adapter = StreamSurfaceAdapter::new(&context);
    adapter.stream_available(first, size(8, 8)).unwrap();
    assert_eq!(adapter.stream_updated(&second, 1_000), Err(Error::UnexpectedStream));
    assert_eq!(adapter.pacing().frames(), 0);
    adapter.stream_updated(&first, 2_000).unwrap();
    assert_eq!(adapter.pacing().frames(), 1);

    let options = StreamOptions { identity: StreamIdentityPolicy::Rebind };
    let mut adapter = StreamSurfaceAdapter::with_options(&context, options);
    adapter.stream_available(first, size(8, 8)).unwrap();
    adapter.stream_updated(&second, 1_000).unwrap();
    assert_eq!(adapter.pacing().frames(), 1);
    assert_eq!(adapter.stream_id(), Some(StreamID(1)));
}

#[test]
fn test_stream_updates_feed_pacing() {
    let context = create_context();
    let mut adapter = StreamSurfaceAdapter::new(&context);
    let stream = NativeStream::new(1, size(8, 8));
    adapter.stream_available(stream, size(8, 8)).unwrap();
    context.device().take_calls();

    for &timestamp in &[1_000, 3_000, 4_000] {
        adapter.stream_updated(&stream, timestamp).unwrap();
    }

    let pacing = adapter.pacing();
    assert_eq!(pacing.frames(), 3);
    assert_eq!(pacing.last_timestamp(), Some(4_000));
    assert_eq!(pacing.last_interval(), Some(1_000));
    assert_eq!(pacing.max_interval(), Some(2_000));
    assert_eq!(pacing.mean_interval(), Some(1_500));
    assert!(context.device().calls().is_empty());

    adapter.stream_destroyed(&stream).unwrap();
    adapter.stream_available(stream, size(8, 8)).unwrap();
    assert_eq!(adapter.pacing().frames(), 0);
}

#[test]
fn test_frame_pacing_backward_timestamp() {
    let mut pacing = FramePacing::new();
    assert_eq!(pacing.mean_interval(), None);

    pacing.record(5_000);
    assert_eq!(pacing.last_interval(), None);
    pacing.record(7_000);
    pacing.record(6_000);

    assert_eq!(pacing.frames(), 3);
    assert_eq!(pacing.last_timestamp(), Some(6_000));
    assert_eq!(pacing.last_interval(), Some(2_000));
    assert_eq!(pacing.max_interval(), Some(2_000));
    assert_eq!(pacing.mean_interval(), Some(500));

    pacing.reset();
    assert_eq!(pacing, FramePacing::default());
}

// Replays random event sequences that respect the host ordering contract and checks that the
// binding is bound exactly when the last lifecycle event was not a destroy.
#[test]
fn test_direct_surface_random_replay() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for _ in 0..64 {
        let context = create_context();
        let mut adapter = DirectSurfaceAdapter::new(&context);
        let mut next_widget = 0;
        let mut last_was_destroy = true;

        for _ in 0..rng.gen_range(1..40) {
            if !adapter.binding().is_bound() {
                next_widget += 1;
                let size = size(rng.gen_range(1..2048), rng.gen_range(1..2048));
                adapter.surface_created(NativeWidget::new(next_widget, size)).unwrap();
                last_was_destroy = false;
            } else if rng.gen_bool(0.7) {
                adapter.surface_changed(size(rng.gen_range(1..2048), rng.gen_range(1..2048)))
                       .unwrap();
                last_was_destroy = false;
            } else {
                adapter.surface_destroyed().unwrap();
                last_was_destroy = true;
            }

            assert_eq!(adapter.state().is_bound(), !last_was_destroy);
            assert_eq!(context.device().live_surfaces(), !last_was_destroy as usize);
            assert_eq!(context.bound_surface_count(), !last_was_destroy as usize);
        }
    }
}

#[test]
fn test_stream_random_replay() {
    let mut rng = StdRng::seed_from_u64(0xca11);
    for _ in 0..64 {
        let context = create_context();
        let mut adapter = StreamSurfaceAdapter::new(&context);
        let stream = NativeStream::new(rng.gen(), size(256, 256));
        let mut last_was_destroy = true;
        let mut timestamp = 0;

        for _ in 0..rng.gen_range(1..40) {
            if !adapter.binding().is_bound() {
                adapter.stream_available(stream, size(256, 256)).unwrap();
                last_was_destroy = false;
            } else {
                match rng.gen_range(0..3) {
                    0 => {
                        let size = size(rng.gen_range(1..2048), rng.gen_range(1..2048));
                        adapter.stream_size_changed(stream, size).unwrap();
                        last_was_destroy = false;
                    }
                    1 => {
                        timestamp += rng.gen_range(1..50_000_000);
                        adapter.stream_updated(&stream, timestamp).unwrap();
                        last_was_destroy = false;
                    }
                    _ => {
                        assert_eq!(adapter.stream_destroyed(&stream), Ok(true));
                        last_was_destroy = true;
                    }
                }
            }

            assert_eq!(adapter.state().is_bound(), !last_was_destroy);
            assert_eq!(context.device().live_surfaces(), !last_was_destroy as usize);
        }
    }
}
