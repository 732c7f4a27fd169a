// A small registry in the upstream gl.xml schema, with one of most things the generator
// has to cope with.
pub const REGISTRY: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<registry>
    <comment>synthetic registry for tests</comment>
    <types>
        <type>typedef unsigned int <name>GLenum</name>;</type>
    </types>
    <groups>
        <group name="TextureTarget">
            <enum name="GL_TEXTURE_2D"/>
            <enum name="GL_NOT_DEFINED_ANYWHERE"/>
        </group>
        <group name="Orphaned">
            <enum name="GL_MISSING"/>
        </group>
        <group name="ClearBufferMask">
            <enum name="GL_COLOR_BUFFER_BIT"/>
        </group>
    </groups>
    <enums namespace="GL" start="0x0000" end="0x7FFF">
        <enum value="0x0DE1" name="GL_TEXTURE_2D"/>
        <enum value="0x1" name="GL_ONE_HEX"/>
        <enum value="0xFFFFFFFF" name="GL_INVALID_INDEX" type="u"/>
        <enum value="0xFFFFFFFFFFFFFFFF" name="GL_TIMEOUT_IGNORED" type="ull"/>
        <enum value="-5" name="GL_NEGATIVE"/>
        <enum value="255" name="GL_DECIMAL"/>
        <enum value="0x8259" name="GL_ACTIVE_PROGRAM_EXT" api="gl"/>
        <enum value="0x8B8D" name="GL_ACTIVE_PROGRAM_EXT" api="gles2"/>
        <unused start="0x8000" end="0x8FFF" comment="reserved"/>
    </enums>
    <enums namespace="GL" group="ClearBufferMask" type="bitmask">
        <enum value="0x00004000" name="GL_COLOR_BUFFER_BIT" group="ClearBufferMask"/>
        <enum value="0x00000100" name="GL_DEPTH_BUFFER_BIT" group="ClearBufferMask"/>
    </enums>
    <enums namespace="OcclusionQueryEventMaskAMD">
        <enum value="0x00000001" name="GL_QUERY_DEPTH_PASS_EVENT_BIT_AMD"/>
    </enums>
    <commands namespace="GL">
        <command>
            <proto>void <name>glShaderSource</name></proto>
            <param class="shader"><ptype>GLuint</ptype> <name>shader</name></param>
            <param><ptype>GLsizei</ptype> <name>count</name></param>
            <param len="count">const <ptype>GLchar</ptype> *const*<name>string</name></param>
            <param len="count">const <ptype>GLint</ptype> *<name>length</name></param>
        </command>
        <command>
            <proto>void <name>glBindTexture</name></proto>
            <param group="TextureTarget"><ptype>GLenum</ptype> <name>target</name></param>
            <param class="texture"><ptype>GLuint</ptype> <name>texture</name></param>
            <glx type="render" opcode="4117"/>
        </command>
        <command>
            <proto>const <ptype>GLubyte</ptype> *<name>glGetString</name></proto>
            <param group="StringName"><ptype>GLenum</ptype> <name>name</name></param>
        </command>
        <command>
            <proto>void *<name>glMapBuffer</name></proto>
            <param><ptype>GLenum</ptype> <name>target</name></param>
            <param><ptype>GLenum</ptype> <name>access</name></param>
        </command>
        <command>
            <proto>void <name>glDeleteTextures</name></proto>
            <param><ptype>GLsizei</ptype> <name>n</name></param>
            <param len="n">const <ptype>GLuint</ptype> *<name>textures</name></param>
        </command>
        <command>
            <proto><ptype>GLsync</ptype> <name>glCreateSyncFromCLeventARB</name></proto>
            <param>struct <ptype>_cl_context</ptype> *<name>context</name></param>
            <param>struct <ptype>_cl_event</ptype> *<name>event</name></param>
            <param><ptype>GLbitfield</ptype> <name>flags</name></param>
        </command>
        <command>
            <proto>void <name>glBufferData</name></proto>
            <param><ptype>GLenum</ptype> <name>target</name></param>
            <param><ptype>GLsizeiptr</ptype> <name>size</name></param>
            <param len="size">const void *<name>data</name></param>
            <param><ptype>GLenum</ptype> <name>usage</name></param>
        </command>
        <command>
            <proto>void <name>glOrphanNV</name></proto>
            <param><ptype>GLenum</ptype> <name>type</name></param>
        </command>
    </commands>
    <feature api="gl" name="GL_VERSION_1_0" number="1.0">
        <require>
            <type name="GLenum"/>
            <command name="glBindTexture"/>
            <command name="glDeleteTextures"/>
            <command name="glGetString"/>
            <command name="glBufferData"/>
            <command name="glShaderSource"/>
            <enum name="GL_TEXTURE_2D"/>
        </require>
    </feature>
    <feature api="gles1" name="GL_VERSION_ES_CM_1_0" number="1.0">
        <require>
            <command name="glBindTexture"/>
        </require>
    </feature>
    <feature api="gles2" name="GL_ES_VERSION_2_0" number="2.0">
        <require>
            <command name="glBindTexture"/>
            <command name="glShaderSource"/>
        </require>
    </feature>
    <feature api="gl" name="GL_VERSION_3_2" number="3.2">
        <remove profile="core" comment="deprecated">
            <command name="glBindTexture"/>
        </remove>
    </feature>
    <extensions>
        <extension name="GL_ARB_cl_event" supported="gl|glcore">
            <require>
                <command name="glCreateSyncFromCLeventARB"/>
            </require>
        </extension>
        <extension name="GL_OES_mapbuffer" supported="gles1|gles2">
            <require>
                <enum name="GL_WRITE_ONLY_OES"/>
                <command name="glMapBuffer"/>
            </require>
        </extension>
    </extensions>
</registry>
"#;
