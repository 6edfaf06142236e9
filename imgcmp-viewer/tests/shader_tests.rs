// imgcmp-viewer/tests/shader_tests.rs
//
// Every WGSL program parses and validates under naga, and broken source is
// reported as a compile error.

use imgcmp_core::GpuError;
use imgcmp_core::blend::DiffVariant;
use imgcmp_core::gpu::ProgramSource;
use imgcmp_core::shaders;
use imgcmp_viewer::gfx::check_wgsl;

fn all_programs() -> Vec<ProgramSource<'static>> {
    let mut programs = vec![shaders::grid(), shaders::single(), shaders::text()];
    programs.extend(DiffVariant::ALL.into_iter().map(shaders::diff));
    programs
}

#[test]
fn test_every_vertex_stage_validates() {
    for program in all_programs() {
        if let Err(e) = check_wgsl(program.label, "vertex", program.vertex) {
            panic!("{}: {}", program.label, e);
        }
    }
}

#[test]
fn test_every_fragment_stage_validates() {
    for program in all_programs() {
        if let Err(e) = check_wgsl(program.label, "fragment", program.fragment) {
            panic!("{}: {}", program.label, e);
        }
    }
}

#[test]
fn test_sampler_names_appear_in_source() {
    for program in all_programs() {
        for sampler in program.samplers {
            assert!(
                program.fragment.contains(&format!("var {}:", sampler)),
                "{} does not declare {}",
                program.label,
                sampler
            );
        }
    }
}

#[test]
fn test_syntax_error_is_compile_error() {
    let err = check_wgsl("broken", "fragment", "fn fs_main( {").unwrap_err();
    match err {
        GpuError::Compile { label, stage, .. } => {
            assert_eq!(label, "broken");
            assert_eq!(stage, "fragment");
        }
        other => panic!("expected compile error, got {:?}", other),
    }
}

#[test]
fn test_type_error_is_compile_error() {
    let source = "@fragment fn fs_main() -> @location(0) vec4<f32> { return 1.0; }";
    assert!(matches!(
        check_wgsl("typed", "fragment", source),
        Err(GpuError::Compile { .. })
    ));
}
