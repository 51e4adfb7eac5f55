//! AFM text used across the integration tests.

/// Two glyphs and one kerning pair.
pub const ROUND_TRIP: &str = "\
StartFontMetrics 4.1
FontName Test
UnderlinePosition -100
UnderlineThickness 50
StartCharMetrics 2
C 65 ; WX 600 ; N A ; B 10 0 590 700 ;
C 66 ; WX 620 ; N B ; B 20 0 600 700 ;
EndCharMetrics
StartKernData
StartKernPairs 1
KPX A B -20
EndKernPairs
EndKernData
EndFontMetrics
";

/// A trimmed Helvetica with an unencoded glyph and a pair that refers to it.
pub const HELVETICA_SUBSET: &str = "\
StartFontMetrics 4.1
Comment Copyright (c) 1985, 1987, 1989, 1990, 1997 Adobe Systems Incorporated.
FontName Helvetica
FullName Helvetica
FamilyName Helvetica
Weight Medium
ItalicAngle 0
IsFixedPitch false
UnderlinePosition -100
UnderlineThickness 50
FontBBox -166 -225 1000 931
StartCharMetrics 7
C 32 ; WX 278 ; N space ; B 0 0 0 0 ;
C 65 ; WX 667 ; N A ; B 14 0 654 718 ;
C 84 ; WX 611 ; N T ; B 23 0 589 718 ;
C 86 ; WX 667 ; N V ; B 14 0 653 718 ;
C 111 ; WX 556 ; N o ; B 35 -14 521 538 ;
C 233 ; WX 556 ; N eacute ; B 40 -15 516 734 ;
C -1 ; WX 556 ; N ecaron ; B 40 -15 516 734 ;
EndCharMetrics
StartKernData
StartKernPairs 5
KPX A T -90
KPX A V -70
KPX T o -120
KPX V o -80
KPX ecaron T -50
EndKernPairs
EndKernData
EndFontMetrics
";

/// Metrics for one of the standard font names, one glyph wide.
pub fn standard_afm(postscript_name: &str, width: i32) -> String {
    format!(
        "FontName {postscript_name}\nUnderlinePosition -100\nUnderlineThickness 50\n\
         C 65 ; WX {width} ; N A ; B 0 0 {width} 700 ;\n"
    )
}
