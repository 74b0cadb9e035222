use std::fs::{self, File};
use std::io::Write;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use mutscore::types::config::{CONFIG_FILENAME, Config, ExperimentConfig};

/// Stands in for the JVM: dispatches on the main class and fakes each
/// engine's behaviour.
const FAKE_JAVA: &str = r#"#!/bin/sh
cp="$2"
main="$3"
case "$main" in
  Harness)
    [ -f "$4" ] || { echo "missing suite $4" >&2; exit 7; }
    case "$cp" in
      mu1.jar:*) exit 1 ;;
      mu2.jar:*) exit 0 ;;
      *) echo "java.lang.RuntimeException: boom" >&2; exit 255 ;;
    esac
    ;;
  com.reeltwo.jumble.Jumble)
    [ -f tests.csv ] || { echo "no staged suite" >&2; exit 3; }
    if grep -q crash tests.csv; then
      echo "java.lang.OutOfMemoryError: Java heap space" >&2
      exit 4
    fi
    echo "Mutating $4"
    echo "Mutation points = 4, unit test time limit 2.00s"
    if grep -q abandon tests.csv; then
      echo "...."
      echo "Score: 100%"
    else
      echo "..M FAIL: $4:12: negated conditional"
      echo "."
      echo "Score: 75%"
    fi
    ;;
  Empty)
    echo "Mutation points = 0, unit test time limit 2.00s"
    echo "Score: 100%"
    ;;
  org.pitest.mutationtest.commandline.MutationCoverageReport)
    [ -f tests.csv ] || { echo "no staged suite" >&2; exit 3; }
    shift 3
    while [ $# -gt 0 ]; do
      if [ "$1" = "--reportDir" ]; then dir="$2"; fi
      shift
    done
    mkdir -p "$dir"
    cat > "$dir/mutations.xml" <<'XML'
<mutations>
<mutation detected='true' status='KILLED'><mutatedClass>a.Scanette</mutatedClass><lineNumber>3</lineNumber><description>negated conditional</description></mutation>
<mutation detected='false' status='SURVIVED'><mutatedClass>a.Scanette</mutatedClass><lineNumber>3</lineNumber><description>removed call</description></mutation>
</mutations>
XML
    ;;
  *)
    echo "unknown main class $main" >&2
    exit 9
    ;;
esac
"#;

pub const SUITE_SHORT: &str = "1, 0, client1, scanette, debloquer, [], 0\n\
                               2, 1, client1, scanette, scanner, [3560070048786], 0\n";

pub const SUITE_LONG: &str = "1, 0, client2, scanette, debloquer, [], 0\n\
                              \n\
                              2, 1, client2, scanette, scanner, [3560070048786], 0\n\
                              3, 2, client2, scanette, abandon, [], ?\n";

/// Makes the streaming tool exit abnormally
pub const SUITE_CRASH: &str = "1, 0, client3, scanette, crash, [], 0\n";

pub fn fake_java(dir: &Path) -> PathBuf {
    let script = dir.join("fake-java");
    let mut file = File::create(&script).expect("fake java script should be created");
    file.write_all(FAKE_JAVA.as_bytes())
        .expect("fake java script should be written");
    file.sync_all().expect("fake java script should be flushed");
    fs::set_permissions(&script, PermissionsExt::from_mode(0o755))
        .expect("fake java script should be executable");
    script
}

/// Config for all three engines, run inside `dir`
pub fn config_toml(dir: &Path, program: &Path) -> String {
    format!(
        r#"
package = "a"

[run]
output = "{dir}/results"
workdir = "{dir}"

[runtime]
program = "{program}"
classpath = ["lib.jar"]

[engines.binary]
entry_point = "Harness"

[engines.streaming]
test_class = "TestCsv"

[engines.structured]
test_class = "TestCsv"
source_dirs = ["src"]

[[targets]]
name = "Hand"
engine = "binary"
mutant_pattern = "mu{{}}.jar"
mutant_count = 3

[[targets]]
name = "Cart"
engine = "streaming"

[[targets]]
name = "Scanette"
engine = "structured"
"#,
        dir = dir.display(),
        program = program.display()
    )
}

pub fn write_config(dir: &Path, toml: &str) -> PathBuf {
    let path = dir.join(CONFIG_FILENAME);
    fs::write(&path, toml).expect("config should be written");
    path
}

pub fn resolve(toml: &str) -> ExperimentConfig {
    let cfg: Config = toml::from_str(toml).expect("config should parse");
    cfg.resolve().expect("config should resolve")
}

pub fn write_suite(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("suite should be written");
    path
}
