use super::*;

fn strs(v: &[&str]) -> Vec<String> {
    v.iter().map(|s| s.to_string()).collect()
}

#[test]
fn empty_field() {
    assert_eq!(Vec::<String>::new(), expand(ArgField::Empty).unwrap());
}

#[test]
fn imm8() {
    assert_eq!(
        strs(&["1", "2", "4", "8", "16", "32", "64", "128"]),
        expand(ArgField::Class('n')).unwrap()
    );
}

#[test]
fn mem8() {
    assert_eq!(
        strs(&["(1)", "(2)", "(4)", "(8)", "(16)", "(32)", "(64)", "(128)"]),
        expand(ArgField::Class('m')).unwrap()
    );
}

#[test]
fn imm16() {
    let args = expand(ArgField::Class('N')).unwrap();
    assert_eq!(16, args.len());
    assert_eq!("1", args[0]);
    assert_eq!("256", args[8]);
    assert_eq!("32768", args[15]);
}

#[test]
fn mem16() {
    let args = expand(ArgField::Class('M')).unwrap();
    assert_eq!(16, args.len());
    assert_eq!("(1)", args[0]);
    assert_eq!("(32768)", args[15]);
}

#[test]
fn indexed_displacements() {
    assert_eq!(
        strs(&["(IX)", "(IX+1)", "(IX-1)", "(IX+100)", "(IX-127)"]),
        expand_class('x').unwrap()
    );
    assert_eq!(
        strs(&["(IY)", "(IY+1)", "(IY-1)", "(IY+100)", "(IY-127)"]),
        expand_class('y').unwrap()
    );
}

#[test]
fn single_literals() {
    assert_eq!(strs(&["A"]), expand_class('A').unwrap());
    assert_eq!(strs(&["(C)"]), expand_class('k').unwrap());
    assert_eq!(strs(&["(HL)"]), expand_class('l').unwrap());
    assert_eq!(strs(&["AF'"]), expand_class('f').unwrap());
    assert_eq!(strs(&["IX"]), expand_class('X').unwrap());
    assert_eq!(strs(&["NC"]), expand_class('=').unwrap());
    assert_eq!(strs(&["PE"]), expand_class('2').unwrap());
}

#[test]
fn every_literal_expands_to_itself() {
    for (class, value) in ARGSPEC_TABLE {
        if matches!(*class, IX_INDIRECT | IY_INDIRECT) {
            continue;
        }
        assert_eq!(vec![value.to_string()], expand_class(*class).unwrap());
    }
}

#[test]
fn bit_indexes() {
    assert_eq!(strs(&["0", "3", "7"]), expand_class('\x0c').unwrap());
}

#[test]
fn groups() {
    assert_eq!(
        strs(&["BC", "DE", "HL", "AF"]),
        expand_class('\x01').unwrap()
    );
    assert_eq!(strs(&["Z", "NZ", "C", "NC"]), expand_class('\x02').unwrap());
    assert_eq!(
        strs(&["BC", "DE", "IX", "SP"]),
        expand_class('\x04').unwrap()
    );
    assert_eq!(
        strs(&["Z", "NZ", "C", "NC", "P", "M", "PO", "PE"]),
        expand_class('\x0a').unwrap()
    );
    assert_eq!(
        strs(&["B", "C", "D", "E", "H", "L", "A"]),
        expand(ArgField::Class('\x0b')).unwrap()
    );
}

#[test]
fn group_members_are_literals() {
    for (_, members) in ARGGROUP_TABLE {
        for c in members.chars() {
            assert!(literal(c).is_some(), "{c:?} missing from literal table");
        }
    }
}

#[test]
fn unknown_classes() {
    assert_eq!(Err(ExpandError::UnknownClass(b'q')), expand_class('q'));
    assert_eq!(Err(ExpandError::UnknownClass(0x06)), expand_class('\x06'));
    assert_eq!(
        "Unknown operand class: 0x71",
        expand_class('q').unwrap_err().to_string()
    );
}

#[test]
fn relative_targets() {
    assert_eq!(
        strs(&["$+1", "$+2", "$+4", "$-1", "$-2", "$-4"]),
        relative(&["1", "2", "4", "8"])
    );
}

#[test]
fn relative_drops_last_immediate() {
    let imm = expand_class('n').unwrap();
    let targets = relative(imm.as_slice());
    assert_eq!(2 * (imm.len() - 1), targets.len());
    assert!(!targets.contains(&"$+128".to_string()));
    assert!(!targets.contains(&"$-128".to_string()));
    assert_eq!("$+64", targets[6]);
    assert_eq!("$-1", targets[7]);
}

#[test]
fn relative_of_nothing() {
    assert_eq!(Vec::<String>::new(), relative::<&str>(&[]));
    assert_eq!(Vec::<String>::new(), relative(&["1"]));
}
