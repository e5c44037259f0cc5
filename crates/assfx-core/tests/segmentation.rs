//! End-to-end segmentation tests: karaoke syllables, words, chars and the
//! partition invariants between them.

use assfx_core::{Ass, MonospaceMetrics, NullMetrics, ParseOptions, ParseWarning};

fn script(events: &str) -> String {
    format!(
        "[Script Info]\n\
         PlayResX: 1280\n\
         PlayResY: 720\n\
         \n\
         [V4+ Styles]\n\
         Format: Name, Fontname, Fontsize, PrimaryColour, SecondaryColour, OutlineColour, BackColour, Bold, Italic, Underline, StrikeOut, ScaleX, ScaleY, Spacing, Angle, BorderStyle, Outline, Shadow, Alignment, MarginL, MarginR, MarginV, Encoding\n\
         Style: K,Arial,20,&H00FFFFFF,&H000000FF,&H00000000,&H00000000,0,0,0,0,100,100,0,0,1,2,0,2,10,10,10,1\n\
         \n\
         [Events]\n\
         Format: Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text\n\
         {events}\n"
    )
}

fn parse(events: &str) -> Ass {
    Ass::parse(
        &script(events),
        &MonospaceMetrics::default(),
        &ParseOptions::default(),
    )
    .expect("script parses")
}

#[test]
fn karaoke_line_decomposes_into_timed_syllables() {
    let ass = parse("Dialogue: 0,0:00:00.00,0:00:01.50,K,,0,0,0,,{\\k50}Hel{\\k50}lo {\\k50}world!");
    let line = &ass.lines[0];

    assert_eq!(line.text, "Hello world!");

    let texts: Vec<&str> = line.syls.iter().map(|s| s.text.as_str()).collect();
    assert_eq!(texts, ["Hel", "lo", "world!"]);

    let times: Vec<(i64, i64)> = line
        .syls
        .iter()
        .map(|s| (s.start_time, s.end_time))
        .collect();
    assert_eq!(times, [(0, 500), (500, 1000), (1000, 1500)]);

    let word_is: Vec<usize> = line.syls.iter().map(|s| s.word_i).collect();
    assert_eq!(word_is, [0, 0, 1]);

    assert_eq!(line.words.len(), 2);
    assert_eq!(line.words[0].text, "Hello");
    assert_eq!(line.words[1].text, "world!");
}

#[test]
fn syllable_chars_concatenate_to_syllable_text() {
    let ass = parse("Dialogue: 0,0:00:00.00,0:00:01.50,K,,0,0,0,,{\\k50}Hel{\\k50}lo {\\k50}world!");
    let line = &ass.lines[0];

    for syl in &line.syls {
        let rebuilt: String = line
            .chars
            .iter()
            .filter(|c| c.syl_i == syl.i)
            .map(|c| c.text)
            .collect();
        assert_eq!(rebuilt, syl.text);
    }

    // char indexes are dense and ordered
    for (expected, ch) in line.chars.iter().enumerate() {
        assert_eq!(ch.i, expected);
    }

    // chars inherit their syllable's timing
    let ch = line.chars.iter().find(|c| c.syl_i == 2).unwrap();
    assert_eq!((ch.start_time, ch.end_time), (1000, 1500));
}

#[test]
fn words_partition_the_stripped_text() {
    let ass = parse("Dialogue: 0,0:00:00.00,0:00:02.00,K,,0,0,0,,  Hello  big world ");
    let line = &ass.lines[0];

    let mut rebuilt = String::new();
    for word in &line.words {
        rebuilt.push_str(&" ".repeat(word.prespace));
        rebuilt.push_str(&word.text);
        rebuilt.push_str(&" ".repeat(word.postspace));
    }
    assert_eq!(rebuilt, line.text);
}

#[test]
fn line_without_karaoke_is_one_full_span_syllable() {
    let ass = parse("Dialogue: 0,0:00:00.00,0:00:03.00,K,,0,0,0,,Just some text");
    let line = &ass.lines[0];
    assert_eq!(line.syls.len(), 1);
    assert_eq!(line.syls[0].text, "Just some text");
    assert_eq!(line.syls[0].start_time, 0);
    assert_eq!(line.syls[0].end_time, 3000);
    assert_eq!(line.syls[0].tags, "");
}

#[test]
fn zero_duration_karaoke_syllable_is_kept() {
    let ass = parse("Dialogue: 0,0:00:00.00,0:00:01.00,K,,0,0,0,,{\\k0}a{\\k100}b");
    let line = &ass.lines[0];
    assert_eq!(line.syls.len(), 2);
    assert_eq!(line.syls[0].duration, 0);
    assert_eq!(line.syls[1].duration, 1000);
}

#[test]
fn karaoke_variants_segment_identically() {
    for tag in ["k", "K", "kf", "ko"] {
        let ass = parse(&format!(
            "Dialogue: 0,0:00:00.00,0:00:01.00,K,,0,0,0,,{{\\{tag}50}}ha{{\\{tag}50}}lf"
        ));
        let line = &ass.lines[0];
        assert_eq!(line.syls.len(), 2, "\\{tag}");
        assert_eq!(line.syls[0].end_time, 500, "\\{tag}");
    }
}

#[test]
fn inline_fx_scopes_forward() {
    let ass = parse(
        "Dialogue: 0,0:00:00.00,0:00:01.00,K,,0,0,0,,{\\k25}a{\\k25\\-burn}b{\\k25}c{\\k25\\-calm}d",
    );
    let fx: Vec<&str> = ass.lines[0]
        .syls
        .iter()
        .map(|s| s.inline_fx.as_str())
        .collect();
    assert_eq!(fx, ["", "burn", "burn", "calm"]);

    // chars inherit the effect of their syllable
    let char_fx: Vec<&str> = ass.lines[0]
        .chars
        .iter()
        .map(|c| c.inline_fx.as_str())
        .collect();
    assert_eq!(char_fx, ["", "burn", "burn", "calm"]);
}

#[test]
fn non_karaoke_tags_ride_with_their_syllable() {
    let ass = parse("Dialogue: 0,0:00:00.00,0:00:01.00,K,,0,0,0,,{\\k50\\1c&HFF00FF&}colou{\\k50}red");
    let line = &ass.lines[0];
    assert_eq!(line.syls[0].tags, "\\k50\\1c&HFF00FF&");
    assert_eq!(line.syls[1].tags, "\\k50");
}

#[test]
fn unterminated_block_degrades_to_literal_text() {
    let ass = parse("Dialogue: 0,0:00:00.00,0:00:01.00,K,,0,0,0,,oops {\\pos(10,20");
    let line = &ass.lines[0];
    assert_eq!(line.text, "oops {\\pos(10,20");
    assert!(ass
        .warnings()
        .iter()
        .any(|w| matches!(w, ParseWarning::MalformedTag { event: 0 })));
}

#[test]
fn unknown_style_still_produces_segmentation() {
    let ass = parse("Dialogue: 0,0:00:00.00,0:00:01.00,Nope,,0,0,0,,{\\k100}hi");
    assert!(ass
        .warnings()
        .iter()
        .any(|w| matches!(w, ParseWarning::UnknownStyle { event: 0, .. })));
    let line = &ass.lines[0];
    assert_eq!(line.syls.len(), 1);
    assert_eq!(line.syls[0].text, "hi");
    assert_eq!(line.styleref.fontname, "Arial");
}

#[test]
fn comment_lines_are_parsed_like_dialogue() {
    let ass = parse("Comment: 0,0:00:00.00,0:00:01.00,K,,0,0,0,,{\\k100}note");
    let line = &ass.lines[0];
    assert!(line.comment);
    assert_eq!(line.syls.len(), 1);
}

#[test]
fn null_metrics_degrade_geometry_not_timing() {
    let source = script("Dialogue: 0,0:00:00.00,0:00:01.00,K,,0,0,0,,{\\k50}He{\\k50}y");
    let ass = Ass::parse(&source, &NullMetrics, &ParseOptions::default()).unwrap();
    let line = &ass.lines[0];
    assert_eq!(line.syls[1].end_time, 1000);
    assert_eq!(line.width, 0.0);
    assert_eq!(line.syls[0].width, 0.0);
}

#[test]
fn escaped_braces_are_text_not_blocks() {
    let ass = parse("Dialogue: 0,0:00:00.00,0:00:01.00,K,,0,0,0,,a\\{b\\}c");
    assert_eq!(ass.lines[0].text, "a{b}c");
    assert!(ass.warnings().is_empty());
}
