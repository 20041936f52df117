mod support;

use approx::assert_relative_eq;
use gerber_stencil::gerber::{
    Aperture, AnomalyKind, AxisFormat, Command, CoordinateFormat, Drawing, MacroPrimitive,
    MacroValue, PrimitiveRejection, Unit, ZeroOmission,
};
use support::SINGLE_PAD;

#[test]
fn decimal_point_coordinates_are_taken_literally() {
    let format = CoordinateFormat {
        x: AxisFormat::new(2, 4),
        y: AxisFormat::new(3, 5),
        ..Default::default()
    };
    for (text, expected) in [("1.5", 1.5), ("-0.25", -0.25), ("12.0", 12.0), ("0.0001", 0.0001)] {
        assert_eq!(format.parse_axis(&format.x, text), Some(expected));
        assert_eq!(format.parse_axis(&format.y, text), Some(expected));
    }
}

#[test]
fn integer_coordinates_are_scaled_by_decimal_digits() {
    let format = CoordinateFormat {
        x: AxisFormat::new(2, 4),
        y: AxisFormat::new(2, 4),
        ..Default::default()
    };
    let value = format.parse_axis(&format.x, "1234").unwrap();
    assert_relative_eq!(value, 0.1234);
    let value = format.parse_axis(&format.y, "-100000").unwrap();
    assert_relative_eq!(value, -10.0);
}

#[test]
fn single_pad_drawing() {
    let drawing = Drawing::parse_str(SINGLE_PAD);

    assert_eq!(drawing.state.format.x, AxisFormat::new(2, 4));
    assert_eq!(drawing.state.format.y, AxisFormat::new(2, 4));
    assert_eq!(drawing.state.format.zeros, ZeroOmission::Leading);
    assert_eq!(drawing.state.unit, Unit::Millimeters);
    assert_eq!(
        drawing.state.aperture(10),
        Some(&Aperture::Circle { diameter: 0.5 })
    );
    assert_eq!(drawing.commands.len(), 2);
    assert_eq!(drawing.commands[0], Command::SelectAperture(10));
    match drawing.commands[1] {
        Command::FlashAt { x: Some(x), y: Some(y) } => {
            assert_relative_eq!(x, 10.0);
            assert_relative_eq!(y, 10.0);
        },
        ref other => panic!("expected a flash, got {other:?}"),
    }
    assert_eq!(drawing.flash_count(), 1);
    assert_eq!(drawing.draw_count(), 0);
    assert!(drawing.anomalies.is_empty(), "{:?}", drawing.anomalies);
}

#[test]
fn omitted_axes_stay_unset() {
    let drawing = Drawing::parse_str("%FSLAX24Y24*%\nX10000Y20000D02*\nX30000D01*\nY40000D01*\n");
    assert_eq!(
        drawing.commands,
        vec![
            Command::MoveTo { x: Some(1.0), y: Some(2.0) },
            Command::DrawTo { x: Some(3.0), y: None },
            Command::DrawTo { x: None, y: Some(4.0) },
        ]
    );
    assert_eq!(drawing.draw_count(), 2);
}

#[test]
fn multiple_statements_per_line() {
    let drawing = Drawing::parse_str("%FSLAX24Y24*%\nD11*X10000Y10000D03*X20000D03*\n");
    assert_eq!(drawing.commands.len(), 3);
    assert_eq!(drawing.flash_count(), 2);
}

#[test]
fn inch_units_from_directive_and_legacy_codes() {
    assert_eq!(Drawing::parse_str("%MOIN*%").state.unit, Unit::Inches);
    assert_eq!(Drawing::parse_str("G70*").state.unit, Unit::Inches);
    assert_eq!(Drawing::parse_str("%MOIN*%\nG71*").state.unit, Unit::Millimeters);
}

#[test]
fn trailing_zero_omission_pads_to_full_width() {
    let drawing = Drawing::parse_str("%FSTAX24Y24*%\nX15Y025D03*\n");
    match drawing.commands[..] {
        [Command::FlashAt { x: Some(x), y: Some(y) }] => {
            assert_relative_eq!(x, 15.0);
            assert_relative_eq!(y, 2.5);
        },
        ref other => panic!("unexpected commands {other:?}"),
    }
}

#[test]
fn aperture_templates() {
    let drawing = Drawing::parse_str(
        "%ADD10C,0.5*%\n%ADD11R,1.0X0.6*%\n%ADD12O,1.2X0.4*%\n%ADD13BOX,0.3X0.2*%\n",
    );
    let state = &drawing.state;
    assert_eq!(state.apertures.len(), 4);
    assert_eq!(
        state.aperture(11),
        Some(&Aperture::Rectangle { width: 1.0, height: 0.6 })
    );
    assert_eq!(
        state.aperture(12),
        Some(&Aperture::Obround { width: 1.2, height: 0.4 })
    );
    assert_eq!(
        state.aperture(13),
        Some(&Aperture::Macro {
            name: "BOX".to_string(),
            params: vec![0.3, 0.2],
        })
    );
}

#[test]
fn malformed_directives_are_recorded_not_fatal() {
    let drawing = Drawing::parse_str(
        "%ADD05C,0.5*%\n%ADD10R,1.0*%\n%ADD11C,abc*%\n%IPPOS*%\n%ADD12C,0.3*%\nD12*\nX1Y1D03*\n",
    );

    let kinds: Vec<_> = drawing.anomalies.iter().map(|a| a.kind).collect();
    assert_eq!(
        kinds,
        vec![
            AnomalyKind::InvalidApertureCode,
            AnomalyKind::MalformedDirective,
            AnomalyKind::MalformedDirective,
            AnomalyKind::UnsupportedDirective,
        ]
    );
    assert_eq!(drawing.anomalies[0].line, 1);
    assert_eq!(drawing.anomalies[3].text, "IPPOS");
    assert_eq!(drawing.state.apertures.len(), 1);
    assert_eq!(drawing.flash_count(), 1);
}

#[test]
fn unsupported_statements_are_skipped() {
    let drawing = Drawing::parse_str("G04 a comment*\nG36*\nX1Y1D07*\nD10*\nX2Y2D03*\nM02*\n");
    let kinds: Vec<_> = drawing.anomalies.iter().map(|a| a.kind).collect();
    assert_eq!(
        kinds,
        vec![AnomalyKind::UnsupportedStatement, AnomalyKind::UnknownOperation(7)]
    );
    assert_eq!(drawing.commands.len(), 2);
}

#[test]
fn multi_line_macro_with_parameters() {
    let drawing = Drawing::parse_str(
        "%AMPAD*\n0 rounded pad*\n1,1,$1,0,0*\n21,1,$1,$2,0,0,90*\n%\n%ADD20PAD,0.8X0.3*%\nD20*\nX1Y1D03*\n",
    );

    let pad = drawing.state.aperture_macro("PAD").expect("macro defined");
    assert_eq!(
        pad.primitives,
        vec![
            MacroPrimitive::Circle {
                exposure: MacroValue::Literal(1.0),
                diameter: MacroValue::Param(1),
                center_x: MacroValue::Literal(0.0),
                center_y: MacroValue::Literal(0.0),
            },
            MacroPrimitive::CenterLine {
                exposure: MacroValue::Literal(1.0),
                width: MacroValue::Param(1),
                height: MacroValue::Param(2),
                center_x: MacroValue::Literal(0.0),
                center_y: MacroValue::Literal(0.0),
                rotation: MacroValue::Literal(90.0),
            },
        ]
    );
    assert!(drawing.anomalies.is_empty(), "{:?}", drawing.anomalies);
    // Parsing resumed after the macro block.
    assert_eq!(drawing.flash_count(), 1);
}

#[test]
fn single_line_macro_and_rejected_primitives() {
    let drawing = Drawing::parse_str("%AMODD*4,1,3,0,0*1,1,0.5,0,0*%\n%ADD10C,1*%\n");
    let odd = drawing.state.aperture_macro("ODD").expect("macro defined");
    assert_eq!(odd.primitives.len(), 1);
    assert_eq!(
        drawing.anomalies[0].kind,
        AnomalyKind::MacroPrimitive(PrimitiveRejection::UnsupportedCode(4))
    );
    assert!(drawing.state.aperture(10).is_some());
}

#[test]
fn macro_left_open_at_end_of_input() {
    let drawing = Drawing::parse_str("%AMOPEN*\n1,1,0.5,0,0*\n");
    assert_eq!(drawing.state.macros.len(), 1);
    assert_eq!(
        drawing.anomalies.last().map(|a| a.kind),
        Some(AnomalyKind::UnterminatedMacro)
    );
}

#[test]
fn reading_from_a_file() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("paste.gbr");
    std::fs::write(&path, SINGLE_PAD)?;

    let drawing = Drawing::from_path(&path)?;
    assert_eq!(drawing.flash_count(), 1);

    assert!(Drawing::from_path(dir.path().join("missing.gbr")).is_err());
    Ok(())
}

#[test]
fn latin1_comment_bytes_do_not_abort() -> Result<(), Box<dyn std::error::Error>> {
    let mut text = b"G04 Board by M\xfcller*\r\n%TF.Author,J\xf6rg*%\r\n".to_vec();
    text.extend_from_slice(SINGLE_PAD.as_bytes());

    let drawing = Drawing::from_reader(std::io::Cursor::new(text))?;
    assert_eq!(drawing.flash_count(), 1);
    assert_eq!(drawing.state.aperture(10), Some(&Aperture::Circle { diameter: 0.5 }));
    // Only the attribute is skipped; the comment is a no-op.
    assert_eq!(drawing.anomalies.len(), 1);
    assert_eq!(drawing.anomalies[0].kind, AnomalyKind::UnsupportedDirective);
    assert_eq!(drawing.anomalies[0].line, 2);
    Ok(())
}
