use std::sync::Arc;

use dae_animation_core::{
    load_animation, InterpolationKind, LoadError, Loader, ReferenceKind, Semantic,
};

#[test]
fn walk_cycle_loads_clean_with_shared_time_source() {
    let doc = dae_test_fixtures::documents::element("walk-cycle").expect("load walk-cycle fixture");
    let report = load_animation(&doc).expect("root loads");
    assert!(report.is_clean(), "diagnostics: {:?}", report.diagnostics);

    let walk = &report.value;
    assert_eq!(walk.id(), Some("walk"));
    assert_eq!(walk.name(), Some("Walk"));
    assert_eq!(walk.to_string(), "<Animation id=walk, children=2>");
    assert_eq!(walk.walk().count(), 4);
    assert_eq!(report.sources.len(), 6);

    let time = walk.source("walk-time").unwrap();
    assert_eq!(time.params(), ["TIME".to_string()]);

    let knee = walk.find("knee").unwrap();
    assert_eq!(knee.origin().as_str(), "animation#walk/animation#hip/animation#knee");
    let knee_sampler = knee.sampler("knee-sampler").unwrap();
    assert!(Arc::ptr_eq(knee_sampler.input().unwrap().source(), time));
    // Interpolation source is declared on the parent (hip).
    assert_eq!(
        knee_sampler.interpolation().unwrap().source().id(),
        "hip-interp"
    );
    assert_eq!(knee.channels()[0].target(), "knee/rotateX.ANGLE");
}

#[test]
fn walk_cycle_interpolation_and_strided_output() {
    let doc = dae_test_fixtures::documents::element("walk-cycle").unwrap();
    let walk = load_animation(&doc).unwrap().value;

    let arm = walk.find("arm").unwrap();
    let sampler = arm.sampler("arm-sampler").unwrap();
    assert!(sampler.is_complete());
    assert_eq!(
        sampler.interpolation_kinds().unwrap(),
        vec![InterpolationKind::Step; 3]
    );
    let output = sampler.require(Semantic::Output).unwrap().source();
    assert_eq!(output.stride(), 3);
    assert_eq!(output.count(), 3);
    assert_eq!(output.data().as_floats().unwrap()[4], 1.0);

    let hip = walk.find("hip").unwrap();
    assert_eq!(
        hip.samplers()[0].interpolation_kinds().unwrap(),
        vec![InterpolationKind::Linear; 3]
    );
}

#[test]
fn partial_faults_are_isolated_per_unit() {
    let doc = dae_test_fixtures::documents::element("partial-faults").unwrap();
    let report = load_animation(&doc).unwrap();
    let rig = &report.value;

    assert_eq!(rig.samplers().len(), 1);
    assert_eq!(rig.samplers()[0].id(), Some("good-sampler"));
    assert_eq!(rig.channels().len(), 1);
    assert_eq!(rig.channels()[0].target(), "rig/translate.X");

    let children: Vec<_> = rig.children().iter().map(|c| c.id()).collect();
    assert_eq!(children, vec![Some("cascade"), Some("leaf")]);
    let cascade = rig.find("cascade").unwrap();
    assert!(cascade.samplers().is_empty());
    assert!(cascade.channels().is_empty());
    assert_eq!(rig.find("leaf").unwrap().channels().len(), 1);

    let locations: Vec<_> = report
        .diagnostics
        .iter()
        .map(|d| d.location.as_str())
        .collect();
    assert_eq!(
        locations,
        vec![
            "animation#rig/sampler#broken-sampler",
            "animation#rig/channel[1]",
            "animation#rig/animation#cascade/sampler#orphan",
            "animation#rig/animation#cascade/channel[0]",
            "animation#rig/animation#cascade/channel[1]",
            "animation#rig/animation#bad-data",
        ]
    );
    // Samplers are not inherited: the child cannot bind the parent's sampler.
    assert_eq!(
        report.diagnostics[4].error,
        LoadError::UnresolvedReference {
            kind: ReferenceKind::Sampler,
            reference: "#good-sampler".into()
        }
    );
    assert!(matches!(
        report.diagnostics[5].error,
        LoadError::MalformedData { element: "float_array", .. }
    ));
    assert_eq!(report.sources.len(), 3);
    assert!(report.sources.get("bad-values").is_none());
}

#[test]
fn library_isolates_each_top_level_animation() {
    let doc = dae_test_fixtures::documents::element("library").unwrap();
    let report = Loader::default().load_library(&doc).unwrap();

    assert_eq!(report.value.len(), 2);
    assert_eq!(report.value[0].id(), Some("blink"));
    assert_eq!(report.value[1].id(), None);
    assert_eq!(report.value[1].samplers()[0].id(), None);

    assert_eq!(report.diagnostics.len(), 1);
    assert_eq!(
        report.diagnostics[0].location.as_str(),
        "library_animations/animation#corrupt"
    );
    assert_eq!(
        report.diagnostics[0].error,
        LoadError::MissingAttribute {
            element: "source",
            attribute: "id"
        }
    );
}

#[test]
fn every_fixture_parses_as_an_element_tree() {
    for name in dae_test_fixtures::documents::keys() {
        dae_test_fixtures::documents::element(&name)
            .unwrap_or_else(|e| panic!("fixture {name}: {e:#}"));
    }
}
