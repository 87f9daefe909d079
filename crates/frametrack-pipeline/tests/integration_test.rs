use std::sync::Arc;

use frametrack_distance::EuclideanCentroidDistance;
use frametrack_object::DefaultTrackableObjectFactory;
use frametrack_pipeline::{Application, Pipeline, PipelineError, PipelineStep, ResolvedArgument, Resolver};
use frametrack_predict::ConstantVelocityFactory;
use frametrack_types::{BoundingBox, Detection, Image};

fn blank_image() -> Image {
    Image::new(1, 1, Arc::from(vec![0u8]))
}

fn build_application() -> Application {
    let mut pipeline = Pipeline::new("test");
    pipeline.set_detection_step("detect", |_image| {
        vec![Detection::new("car", 0.9, BoundingBox::axis_aligned(10.0, 10.0, 2.0, 2.0).unwrap(), None)]
    });

    Application::builder()
        .tracked_class("car")
        .track_factory(Arc::new(DefaultTrackableObjectFactory))
        .predictor_factory(Arc::new(ConstantVelocityFactory))
        .delete_after(5)
        .distance_algorithm(Arc::new(EuclideanCentroidDistance))
        .threshold(50.0)
        .pipeline(pipeline)
        .build()
        .unwrap()
}

#[test]
fn first_frame_spawns_a_track_and_emits_a_result() {
    let mut app = build_application();
    let result = app.process_frame(blank_image()).unwrap();
    assert_eq!(result["frame_number"], 0);
    assert!(result["frame_timestamp"].is_string());
}

#[test]
fn second_frame_matches_the_existing_track() {
    let mut app = build_application();
    app.process_frame(blank_image()).unwrap();
    let result = app.process_frame(blank_image()).unwrap();
    assert_eq!(result["frame_number"], 1);
}

#[test]
fn ambiguous_class_specifier_is_rejected_at_build_time() {
    let mut pipeline = Pipeline::new("test");
    pipeline.set_detection_step("detect", |_image| Vec::new());

    let result = Application::builder()
        .tracked_class("car")
        .tracked_classes(vec!["bike".to_string()])
        .track_factory(Arc::new(DefaultTrackableObjectFactory))
        .predictor_factory(Arc::new(ConstantVelocityFactory))
        .distance_algorithm(Arc::new(EuclideanCentroidDistance))
        .threshold(50.0)
        .pipeline(pipeline)
        .build();

    assert!(matches!(result, Err(PipelineError::AmbiguousClassSpecifier)));
}

#[test]
fn unregistered_tracking_attribute_access_is_an_error() {
    let app = build_application();
    let result = app.get_tracking_attribute("speed");
    assert!(matches!(result, Err(PipelineError::AttributeNotRegistered(_))));
}

#[test]
fn registering_the_same_attribute_twice_is_an_error() {
    let mut app = build_application();
    app.register_tracking_attribute("speed", serde_json::json!(0)).unwrap();
    let result = app.register_tracking_attribute("speed", serde_json::json!(1));
    assert!(matches!(result, Err(PipelineError::AttributeAlreadyRegistered(_))));
}

#[test]
fn tracking_attribute_round_trips_through_set_and_get() {
    let mut app = build_application();
    app.register_tracking_attribute("speed", serde_json::json!(0)).unwrap();
    app.set_tracking_attribute("speed", serde_json::json!(42)).unwrap();
    assert_eq!(app.get_tracking_attribute("speed").unwrap(), &serde_json::json!(42));
}

#[test]
fn pipeline_step_can_read_matched_tracks_of_a_class() {
    let mut pipeline = Pipeline::new("test");
    pipeline.set_detection_step("detect", |_image| {
        vec![Detection::new("car", 0.9, BoundingBox::axis_aligned(10.0, 10.0, 2.0, 2.0).unwrap(), None)]
    });
    pipeline.add_step(PipelineStep::new(
        "count_cars",
        vec![Resolver::TracksOfClass("car".to_string())],
        |args| match &args[0] {
            ResolvedArgument::Tracks(tracks) => Box::new(tracks.len()),
            _ => unreachable!(),
        },
    ));

    let app_builder = Application::builder()
        .tracked_class("car")
        .track_factory(Arc::new(DefaultTrackableObjectFactory))
        .predictor_factory(Arc::new(ConstantVelocityFactory))
        .delete_after(5)
        .distance_algorithm(Arc::new(EuclideanCentroidDistance))
        .threshold(50.0)
        .pipeline(pipeline);
    let mut app = app_builder.build().unwrap();

    app.process_frame(blank_image()).unwrap();
    let result = app.process_frame(blank_image()).unwrap();
    assert!(result["pipeline_step_results"]["count_cars"].is_string());
}
