// ─── Argument Assembly ───
// Flattens the descriptor's argument sections (or the fixed legacy templates)
// into concrete JVM and game argument lists.

use tracing::debug;

use crate::core::launch::placeholders::{substitute, PlaceholderMap};
use crate::core::launch::rules::rules_allow;
use crate::core::launch::LaunchEnv;
use crate::core::version::{ArgumentToken, ArgumentValue, VersionDescriptor};

/// Prefetched auth-server metadata handed to authlib-injector so the agent
/// skips its startup round trip. Base64 of the server's public manifest.
const PREFETCHED_CERT_ARG: &str = "-Dauthlibinjector.yggdrasil.prefetched=ewogICJzaWduYXR1cmVQdWJsaWNrZXkiOiAiLS0tLS1CRUdJTiBQVUJMSUMgS0VZLS0tLS1cbk1JSUJJakFOQmdrcWhraUc5dzBCQVFFRkFBT0NBUThBTUlJQkNnS0NBUUVBendPSEZpUy9rQzlickZONm5qT2laVytJS0U5ZEEyd2hcbk03SXo2QzRNWEFiNk1XKzdqSks1UnFuS290ekM1a3M4TkFXSGc0dGhKMjNNbU0zVVU2amVHdEt4Vy9JZVMrRjFzeEt6ZDFHNnJ2SUtcbnlJNGhkL2dWdDJOWGdlT0hQVFNRV0t2emEwUXM5REcrUHpNSU56VEJ2KzE1WHJxaDBsblI3Y2xjVXh6T0p5TXBpRXdmdTNHdnBLSktcbmhzUGsvVlBrK2lVMjJhZjVZSy93eDNZTS9mVklZM2ZvMlNmTGZ0UzVZbWJnT0pyenRJTzdYbFdWRDhHeWdqUC9kamxJT04vajBLbXhcbk5LaDIwenpiaHozNGk3azVlclo3UTlhelZGeHlWZWZsaGtGc0NiMXZuM2FWYzBwUGdiOVpkVzMzd25POFJtRmIzODQxWkJhQTZadmFcbnQxWG1wUUlEQVFBQlxuLS0tLS1FTkQgUFVCTElDIEtFWS0tLS0tXG4iLAogICJza2luRG9tYWlucyI6IFsKICAgICJmbHVycnkubW9lIiwKICAgICIuZmx1cnJ5Lm1vZSIKICBdLAogICJtZXRhIjogewogICAgInNlcnZlck5hbWUiOiAiRmx1cnJ5IEF1dGggU2VydmVyIiwKICAgICJpbXBsZW1lbnRhdGlvbk5hbWUiOiAiSmF2YSIsCiAgICAiaW1wbGVtZW50YXRpb25WZXJzaW9uIjogIjEuMCIsCiAgICAibGlua3MiOiB7CiAgICAgICJob21lcGFnZSI6ICJodHRwczovL2ZsdXJyeS5tb2UiLAogICAgICAicmVnaXN0ZXIiOiAiaHR0cHM6Ly9mbHVycnkubW9lL3JlZ2lzdGVyIgogICAgfQogIH0sCiAgImZlYXR1cmVzIjogewogICAgIm5vbl9lbWFpbF9sb2dpbiI6IHRydWUsCiAgICAiZW5hYmxlX3Byb2ZpbGVfa2V5IjogdHJ1ZSwKICAgICJmZWF0dXJlLm5vX21vamFuZ19uYW1lc3BhY2UiOiB0cnVlCiAgfQp9";

/// Keys of the fixed game-argument template used when the descriptor has no
/// `arguments` section.
const LEGACY_GAME_TEMPLATE: [(&str, &str); 8] = [
    ("--version", "${version_name}"),
    ("--gameDir", "${game_directory}"),
    ("--assetsDir", "${assets_root}"),
    ("--assetIndex", "${assets_index_name}"),
    ("--uuid", "${auth_uuid}"),
    ("--username", "${auth_player_name}"),
    ("--accessToken", "${auth_access_token}"),
    ("--userType", "${user_type}"),
];

/// Assemble the JVM argument list, auth agent included.
pub fn build_jvm_args(
    descriptor: &VersionDescriptor,
    env: &LaunchEnv,
    vars: &PlaceholderMap,
) -> Vec<String> {
    let mut args = match descriptor.arguments.as_ref() {
        Some(sections) => flatten_tokens(&sections.jvm, &env.current_os, vars),
        None => vec![
            format!("-Djava.library.path={}", env.natives_dir().display()),
            "-cp".to_string(),
            vars.value("classpath").to_string(),
        ],
    };

    inject_auth_agent(&mut args, env);
    args
}

/// Assemble the game argument list.
pub fn build_game_args(
    descriptor: &VersionDescriptor,
    env: &LaunchEnv,
    vars: &PlaceholderMap,
) -> Vec<String> {
    match descriptor.arguments.as_ref() {
        Some(sections) => flatten_tokens(&sections.game, &env.current_os, vars),
        None => LEGACY_GAME_TEMPLATE
            .iter()
            .flat_map(|(flag, template)| {
                [flag.to_string(), substitute(template, vars)]
            })
            .collect(),
    }
}

/// Flatten a modern argument section: nulls are dropped, conditional entries
/// are kept only when their rules allow, and every surviving string goes
/// through placeholder substitution.
fn flatten_tokens(tokens: &[ArgumentToken], current_os: &str, vars: &PlaceholderMap) -> Vec<String> {
    let mut out = Vec::new();

    for token in tokens {
        match token {
            ArgumentToken::Null => {}
            ArgumentToken::Literal(raw) => out.push(substitute(raw, vars)),
            ArgumentToken::Conditional(conditional) => {
                if !rules_allow(&conditional.rules, current_os) {
                    continue;
                }
                match &conditional.value {
                    None => {}
                    Some(ArgumentValue::Single(raw)) => out.push(substitute(raw, vars)),
                    Some(ArgumentValue::Many(raws)) => {
                        out.extend(raws.iter().map(|raw| substitute(raw, vars)));
                    }
                }
            }
        }
    }

    out
}

/// Prepend the authlib-injector agent arguments when a real session exists
/// and the agent jar is on disk. Offline launches skip the agent so vanilla
/// auth behavior applies.
fn inject_auth_agent(args: &mut Vec<String>, env: &LaunchEnv) {
    if !env.session.is_online() {
        return;
    }

    let agent_jar = env.libraries_dir().join("authlib-injector.jar");
    if !agent_jar.exists() {
        debug!("Auth agent jar not present, skipping injection: {:?}", agent_jar);
        return;
    }

    args.insert(0, PREFETCHED_CERT_ARG.to_string());
    args.insert(
        1,
        format!("-javaagent:{}={}", agent_jar.display(), env.api_url),
    );
}
